use actix_web::{get, post, web, Responder};
use actix_web::http::StatusCode;
use log::{info, warn};
use crate::server::controller::error::CustomError;
use crate::server::model::order::{GetOrdersResponse, LineRequest, NewOrder, OrderFilter, OrderResponse};
use crate::server::model::OrderId;
use crate::server::state::AppState;

#[get("/v1/orders")]
/// list orders, optionally by status and table
pub(crate) async fn get_orders(filter: web::Query<OrderFilter>, data: web::Data<AppState>) -> impl Responder {
    let orders = data.lifecycle().lock().await.orders(&filter);
    web::Json(GetOrdersResponse {
        result_code: None,
        orders,
    })
}

#[post("/v1/orders")]
/// place an order for a table
pub(crate) async fn post_orders(body: web::Json<NewOrder>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let created = {
        let menu = data.menu().read().await;
        data.lifecycle().lock().await.create(&*menu, body.into_inner())
    };
    match created {
        Ok(order) => {
            data.persist().await;
            info!("order {} placed for table {}, total={}", order.id, order.table_id, order.total);
            Ok((web::Json(OrderResponse { result_code: None, order }), StatusCode::CREATED))
        }
        Err(e) => {
            warn!("post_orders failed, {}", e);
            Err(e.into())
        }
    }
}

#[get("/v1/order/{id}")]
pub(crate) async fn get_order(id: web::Path<OrderId>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let order = data.lifecycle().lock().await.get(id.into_inner())?;
    Ok(web::Json(OrderResponse { result_code: None, order }))
}

#[post("/v1/order/{id}/advance")]
/// move the order one status forward
pub(crate) async fn post_order_advance(id: web::Path<OrderId>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let advanced = data.lifecycle().lock().await.advance(id.into_inner());
    match advanced {
        Ok(order) => {
            data.persist().await;
            info!("order {} is now {}", order.id, order.status);
            Ok(web::Json(OrderResponse { result_code: None, order }))
        }
        Err(e) => {
            warn!("post_order_advance failed, {}", e);
            Err(e.into())
        }
    }
}

#[post("/v1/order/{id}/items")]
/// add a line to an open order
pub(crate) async fn post_order_items(
    id: web::Path<OrderId>,
    body: web::Json<LineRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let updated = {
        let menu = data.menu().read().await;
        data.lifecycle().lock().await.add_item(&*menu, id.into_inner(), body.into_inner())
    };
    match updated {
        Ok(order) => {
            data.persist().await;
            Ok(web::Json(OrderResponse { result_code: None, order }))
        }
        Err(e) => {
            warn!("post_order_items failed, {}", e);
            Err(e.into())
        }
    }
}

#[post("/v1/order/{id}/settle")]
/// take payment for a delivered order
pub(crate) async fn post_order_settle(id: web::Path<OrderId>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let settled = data.lifecycle().lock().await.settle(id.into_inner());
    match settled {
        Ok(order) => {
            data.persist().await;
            info!("order {} settled, total={}", order.id, order.total);
            Ok(web::Json(OrderResponse { result_code: None, order }))
        }
        Err(e) => {
            warn!("post_order_settle failed, {}", e);
            Err(e.into())
        }
    }
}
