use std::fmt;

use garde::Validate;
use kernel::model::book::{event::CreateBook, Book, BookPatch};
use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use utoipa::ToSchema;

/// Body of `POST /book` and `PUT /book/{code}`.
///
/// Keys match ASCII case-insensitively (`Price` is what older clients send)
/// and a repeated key keeps its last value. `null` leaves a field at its
/// default.
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct BookRequest {
    #[garde(skip)]
    pub tag: String,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(max = 999_999_999_999))]
    pub price: i64,
}

impl<'de> Deserialize<'de> for BookRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BookRequestVisitor;

        impl<'de> Visitor<'de> for BookRequestVisitor {
            type Value = BookRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a book object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut req = BookRequest::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.to_ascii_lowercase().as_str() {
                        "tag" => {
                            if let Some(tag) = map.next_value::<Option<String>>()? {
                                req.tag = tag;
                            }
                        }
                        "name" => {
                            if let Some(name) = map.next_value::<Option<String>>()? {
                                req.name = name;
                            }
                        }
                        "price" => {
                            if let Some(price) = map.next_value::<Option<i64>>()? {
                                req.price = price;
                            }
                        }
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(req)
            }
        }

        deserializer.deserialize_map(BookRequestVisitor)
    }
}

impl From<BookRequest> for CreateBook {
    fn from(value: BookRequest) -> Self {
        let BookRequest { tag, name, price } = value;
        CreateBook::new(tag, name, price)
    }
}

/// Body of `PATCH /book/{code}`. Absent fields keep their stored value;
/// `tag` is accepted but never applied. Keys match the same way as
/// [`BookRequest`].
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct PatchBookRequest {
    #[garde(skip)]
    pub tag: Option<String>,
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(range(max = 999_999_999_999))]
    pub price: Option<i64>,
}

impl<'de> Deserialize<'de> for PatchBookRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PatchBookRequestVisitor;

        impl<'de> Visitor<'de> for PatchBookRequestVisitor {
            type Value = PatchBookRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a partial book object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut req = PatchBookRequest::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.to_ascii_lowercase().as_str() {
                        "tag" => req.tag = map.next_value()?,
                        "name" => req.name = map.next_value()?,
                        "price" => req.price = map.next_value()?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(req)
            }
        }

        deserializer.deserialize_map(PatchBookRequestVisitor)
    }
}

impl From<PatchBookRequest> for BookPatch {
    fn from(value: PatchBookRequest) -> Self {
        BookPatch {
            name: value.name,
            price: value.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub tag: String,
    pub name: String,
    pub price: i64,
}

impl From<BookRequest> for BookResponse {
    fn from(value: BookRequest) -> Self {
        let BookRequest { tag, name, price } = value;
        Self { tag, name, price }
    }
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        let Book {
            tag, name, price, ..
        } = value;
        Self { tag, name, price }
    }
}
