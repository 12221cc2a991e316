use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::book::{delete_book, patch_book, register_book, show_book, update_book};

pub fn build_book_routers() -> Router<AppRegistry> {
    let books_routers = Router::new().route("/", post(register_book)).route(
        "/:code",
        get(show_book)
            .put(update_book)
            .patch(patch_book)
            .delete(delete_book),
    );

    Router::new().nest("/book", books_routers)
}
