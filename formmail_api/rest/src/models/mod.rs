use serde::Serialize;

pub mod contact;

#[derive(Serialize)]
pub struct ApiError<'a> {
    pub message: &'a str,
}
