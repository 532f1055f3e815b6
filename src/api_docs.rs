use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::reviews::list_reviews,
        api::reviews::create_review,
        api::cart::get_cart,
        api::cart::add_to_cart,
        api::cart::update_cart_item,
        api::cart::remove_from_cart,
    ),
    tags(
        (name = "bookmart", description = "Bookmart online bookstore API")
    )
)]
pub struct ApiDoc;
