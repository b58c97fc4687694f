pub(crate) mod error;
mod menu;
mod order;
mod report;
mod table;

use actix_web::{web, HttpRequest};
use crate::server::controller::error::CustomError;

/// Register every handler on the app.
///
/// Bodies, queries and paths that fail to deserialize are answered with the
/// same JSON error envelope as rejected lifecycle calls.
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|e, _: &HttpRequest| {
        CustomError::BadRequest { message: format!("malformed body, {}", e) }.into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|e, _: &HttpRequest| {
        CustomError::BadRequest { message: format!("malformed query, {}", e) }.into()
    }))
    .app_data(web::PathConfig::default().error_handler(|e, _: &HttpRequest| {
        CustomError::ResourceNotFound { message: format!("malformed path, {}", e) }.into()
    }));

    cfg.service(menu::get_menu)
        .service(menu::get_menu_item)
        .service(menu::post_menu)
        .service(menu::patch_menu_item)
        .service(table::get_tables)
        .service(table::post_tables)
        .service(table::get_table)
        .service(table::patch_table)
        .service(table::post_table_clear)
        .service(order::get_orders)
        .service(order::post_orders)
        .service(order::get_order)
        .service(order::post_order_advance)
        .service(order::post_order_items)
        .service(order::post_order_settle)
        .service(report::get_summary);
}
