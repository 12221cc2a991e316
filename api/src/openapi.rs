use utoipa::OpenApi;

use crate::{handler, model};

#[derive(OpenApi)]
#[openapi(
    info(title = "Book API", description = "CRUD over book records"),
    paths(
        handler::health::health_check,
        handler::health::health_check_db,
        handler::book::register_book,
        handler::book::show_book,
        handler::book::update_book,
        handler::book::patch_book,
        handler::book::delete_book,
    ),
    components(schemas(
        model::book::BookRequest,
        model::book::PatchBookRequest,
        model::book::BookResponse,
    )),
    tags(
        (name = "book", description = "Book records"),
        (name = "health", description = "Liveness probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_book_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/book"));
        assert!(doc.paths.paths.contains_key("/book/{code}"));
        assert!(doc.paths.paths.contains_key("/health/db"));
    }
}
