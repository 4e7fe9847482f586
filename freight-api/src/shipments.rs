use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use freight_shared::Page;
use freight_shipment::{PackageDraft, Party, Shipment, ShipmentDraft, ShipmentPage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

const CURRENCY: &str = "SEK";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPayload {
    pub name: String,
    pub email: String,
    pub address: String,
    pub country_code: String,
}

#[derive(Debug, Deserialize)]
pub struct PackagePayload {
    pub weight: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    pub sender: PartyPayload,
    pub receiver: PartyPayload,
    pub package: PackagePayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentBody {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sender: PartyPayload,
    pub receiver: PartyPayload,
    pub package: PricedPackage,
}

#[derive(Debug, Serialize)]
pub struct PricedPackage {
    pub weight: i32,
    pub price: Price,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: i32,
    pub decimal_multiplier: i32,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct ShipmentResponse {
    pub shipment: ShipmentBody,
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct ListMetadata {
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ListShipmentsResponse {
    pub shipments: Vec<ShipmentResponse>,
    pub metadata: ListMetadata,
    pub links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
pub struct ListShipmentsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

// ============================================================================
// Mapping
// ============================================================================

impl From<PartyPayload> for Party {
    fn from(p: PartyPayload) -> Self {
        Party::new(p.name, p.email, p.address, p.country_code)
    }
}

impl From<Party> for PartyPayload {
    fn from(p: Party) -> Self {
        Self {
            name: p.name,
            email: p.email.into_inner(),
            address: p.address,
            country_code: p.country_code,
        }
    }
}

impl CreateShipmentRequest {
    fn into_draft(self, tenant_id: Uuid) -> ShipmentDraft {
        ShipmentDraft {
            tenant_id,
            sender: self.sender.into(),
            receiver: self.receiver.into(),
            package: PackageDraft { weight: self.package.weight },
        }
    }
}

fn shipments_url(public_url: &str, tenant_id: Uuid) -> String {
    format!("{}/v1/tenants/{}/shipments", public_url, tenant_id)
}

impl ShipmentResponse {
    fn new(shipment: Shipment, public_url: &str) -> Self {
        let href = format!("{}/{}", shipments_url(public_url, shipment.tenant_id), shipment.id);

        Self {
            shipment: ShipmentBody {
                id: shipment.id,
                tenant_id: shipment.tenant_id,
                created_at: shipment.created_at,
                sender: shipment.sender.into(),
                receiver: shipment.receiver.into(),
                package: PricedPackage {
                    weight: shipment.package.weight,
                    price: Price {
                        amount: shipment.package.price,
                        decimal_multiplier: 1,
                        currency: CURRENCY.to_string(),
                    },
                },
            },
            links: vec![Link { rel: "self".to_string(), href }],
        }
    }
}

impl ListShipmentsResponse {
    fn new(tenant_id: Uuid, result: ShipmentPage, public_url: &str) -> Self {
        let base = shipments_url(public_url, tenant_id);
        let page = result.page;
        let next = page.next(result.shipments.len());

        let links = vec![
            Link {
                rel: "self".to_string(),
                href: format!("{}?limit={}&offset={}", base, page.limit, page.offset),
            },
            Link {
                rel: "next".to_string(),
                href: format!("{}?limit={}&offset={}", base, next.limit, next.offset),
            },
        ];

        Self {
            shipments: result
                .shipments
                .into_iter()
                .map(|s| ShipmentResponse::new(s, public_url))
                .collect(),
            metadata: ListMetadata { total: result.total },
            links,
        }
    }
}

fn parse_id(kind: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|e| {
        AppError::ValidationError(format!("could not parse {} ID: {}, error: {}", kind, raw, e))
    })
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants/{tenant_id}/shipments",
            post(create_shipment).get(list_shipments),
        )
        .route("/tenants/{tenant_id}/shipments/{shipment_id}", get(get_shipment))
}

/// POST /v1/tenants/{tenant_id}/shipments
pub async fn create_shipment(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    body: Result<Json<CreateShipmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShipmentResponse>), AppError> {
    let tenant_id = parse_id("tenant", &tenant_id)?;
    let Json(req) = body.map_err(|e| {
        AppError::ValidationError(format!("could not parse request body: {}", e.body_text()))
    })?;

    let shipment = state
        .with_deadline(state.shipments.create_shipment(req.into_draft(tenant_id)))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShipmentResponse::new(shipment, &state.public_url)),
    ))
}

/// GET /v1/tenants/{tenant_id}/shipments/{shipment_id}
pub async fn get_shipment(
    State(state): State<AppState>,
    Path((tenant_id, shipment_id)): Path<(String, String)>,
) -> Result<Json<ShipmentResponse>, AppError> {
    let tenant_id = parse_id("tenant", &tenant_id)?;
    let shipment_id = parse_id("shipment", &shipment_id)?;

    let shipment = state
        .with_deadline(state.shipments.get_shipment(tenant_id, shipment_id))
        .await?;

    Ok(Json(ShipmentResponse::new(shipment, &state.public_url)))
}

/// GET /v1/tenants/{tenant_id}/shipments?limit=&offset=
pub async fn list_shipments(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Query(query): Query<ListShipmentsQuery>,
) -> Result<Json<ListShipmentsResponse>, AppError> {
    let tenant_id = parse_id("tenant", &tenant_id)?;
    let page = Page::parse(query.limit.as_deref(), query.offset.as_deref())?;

    let result = state
        .with_deadline(state.shipments.list_shipments(tenant_id, page))
        .await?;

    Ok(Json(ListShipmentsResponse::new(tenant_id, result, &state.public_url)))
}
