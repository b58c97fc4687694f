use actix_web::{get, patch, post, web, Responder};
use actix_web::http::StatusCode;
use log::{info, warn};
use crate::server::controller::error::CustomError;
use crate::server::model::table::{GetTablesResponse, PatchTableRequest, PostTablesRequest, TableResponse};
use crate::server::model::TableId;
use crate::server::state::AppState;

#[get("/v1/tables")]
/// get tables
pub(crate) async fn get_tables(data: web::Data<AppState>) -> impl Responder {
    let tables = data.lifecycle().lock().await.tables();
    web::Json(GetTablesResponse {
        result_code: None,
        tables: Some(tables),
    })
}

#[post("/v1/tables")]
/// add a table to the floor
pub(crate) async fn post_tables(req: web::Json<PostTablesRequest>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let added = data.lifecycle().lock().await.add_table(req.capacity, req.location);
    match added {
        Ok(table) => {
            data.persist().await;
            info!("table {} added, capacity={}, location={}", table.id, table.capacity, table.location);
            Ok((web::Json(TableResponse { result_code: None, table }), StatusCode::CREATED))
        }
        Err(e) => {
            warn!("post_tables failed, {}", e);
            Err(e.into())
        }
    }
}

#[get("/v1/table/{id}")]
pub(crate) async fn get_table(id: web::Path<TableId>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let table = data.lifecycle().lock().await.table(id.into_inner())?;
    Ok(web::Json(TableResponse { result_code: None, table }))
}

#[patch("/v1/table/{id}")]
/// occupy a table
pub(crate) async fn patch_table(
    req: web::Json<PatchTableRequest>,
    id: web::Path<TableId>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let seated = data.lifecycle().lock().await.seat(id.into_inner(), req.customer_count);
    match seated {
        Ok(table) => {
            data.persist().await;
            Ok(web::Json(TableResponse { result_code: None, table }))
        }
        Err(e) => {
            warn!("patch_table failed, {}", e);
            Err(e.into())
        }
    }
}

#[post("/v1/table/{id}/clear")]
/// free a table, keeping its order on record
pub(crate) async fn post_table_clear(id: web::Path<TableId>, data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let cleared = data.lifecycle().lock().await.clear_table(id.into_inner());
    match cleared {
        Ok(table) => {
            data.persist().await;
            info!("table {} has been cleared", table.id);
            Ok(web::Json(TableResponse { result_code: None, table }))
        }
        Err(e) => {
            warn!("post_table_clear failed, {}", e);
            Err(e.into())
        }
    }
}
