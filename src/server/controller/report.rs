use actix_web::{get, web, Responder};
use crate::server::model::order::GetSummaryResponse;
use crate::server::state::AppState;

#[get("/v1/reports/summary")]
/// open orders per status and revenue so far
pub(crate) async fn get_summary(data: web::Data<AppState>) -> impl Responder {
    web::Json(GetSummaryResponse {
        result_code: None,
        summary: data.lifecycle().lock().await.summary(),
    })
}
