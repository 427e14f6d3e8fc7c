// src/handlers/home.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Service descriptor listing the available endpoints.
pub async fn describe() -> impl IntoResponse {
    Json(json!({
        "mensaje": "API de Preguntas v1.0",
        "endpoints": {
            "probar_conexion": "GET /api/test-connection",
            "obtener_preguntas": "POST /api/get-questions",
            "validar_respuestas": "POST /api/validate-answers"
        }
    }))
}
