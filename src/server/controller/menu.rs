use actix_web::{get, patch, post, web, Responder};
use actix_web::http::StatusCode;
use log::{info, warn};
use crate::server::controller::error::CustomError;
use crate::server::model::item::{GetMenuResponse, MenuItemPatch, MenuItemResponse, NewMenuItem};
use crate::server::model::MenuItemId;
use crate::server::state::AppState;

#[get("/v1/menu")]
/// available menu items by category
pub(crate) async fn get_menu(data: web::Data<AppState>) -> impl Responder {
    web::Json(GetMenuResponse {
        result_code: None,
        categories: data.menu().read().await.by_category(),
    })
}

#[get("/v1/menu/{id}")]
pub(crate) async fn get_menu_item(id: web::Path<MenuItemId>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let item = data.menu().read().await.get(&id)?.clone();
    Ok(web::Json(MenuItemResponse { result_code: None, item }))
}

#[post("/v1/menu")]
pub(crate) async fn post_menu(body: web::Json<NewMenuItem>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let added = data.menu().write().await.add(body.into_inner());
    match added {
        Ok(item) => {
            data.persist().await;
            info!("menu item {} added at {}", item.id, item.price);
            Ok((web::Json(MenuItemResponse { result_code: None, item }), StatusCode::CREATED))
        }
        Err(e) => {
            warn!("post_menu failed, {}", e);
            Err(e.into())
        }
    }
}

#[patch("/v1/menu/{id}")]
/// change price, description, category or availability
pub(crate) async fn patch_menu_item(
    id: web::Path<MenuItemId>,
    body: web::Json<MenuItemPatch>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let updated = data.menu().write().await.update(&id, body.into_inner());
    match updated {
        Ok(item) => {
            data.persist().await;
            Ok(web::Json(MenuItemResponse { result_code: None, item }))
        }
        Err(e) => {
            warn!("patch_menu_item failed, {}", e);
            Err(e.into())
        }
    }
}
