use std::sync::Arc;

use async_graphql::{Context, Object, SimpleObject, ID};
use meem_shared::models::{self, Branch, Location};
use meem_shared::{Catalog, CatalogProvider};

// GraphQL output types. Field names are camelCased by async-graphql, which
// keeps responses shaped like the catalog JSON the frontend deserializes.

#[derive(SimpleObject, Clone)]
#[graphql(name = "LocalizedText")]
pub struct GqlLocalizedText {
    pub en: String,
    pub ar: String,
}

impl From<&models::LocalizedText> for GqlLocalizedText {
    fn from(t: &models::LocalizedText) -> Self {
        GqlLocalizedText {
            en: t.en.clone(),
            ar: t.ar.clone(),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Location")]
pub struct GqlLocation {
    pub id: String,
    pub code: String,
    pub name: GqlLocalizedText,
    pub flag: Option<String>,
}

impl From<&Location> for GqlLocation {
    fn from(l: &Location) -> Self {
        GqlLocation {
            id: l.id.clone(),
            code: l.code.clone(),
            name: (&l.name).into(),
            flag: l.flag.clone(),
        }
    }
}

/// Raw coordinates as stored; either component may be absent.
#[derive(SimpleObject)]
#[graphql(name = "Coordinates")]
pub struct GqlCoordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(SimpleObject)]
#[graphql(name = "OpeningHours")]
pub struct GqlOpeningHours {
    pub open: String,
    pub close: String,
}

#[derive(SimpleObject)]
#[graphql(name = "Branch")]
pub struct GqlBranch {
    pub id: String,
    pub location_id: String,
    pub name: GqlLocalizedText,
    pub address: Option<GqlLocalizedText>,
    pub city: GqlLocalizedText,
    pub coordinates: Option<GqlCoordinates>,
    pub phone: Option<String>,
    pub hours: Option<GqlOpeningHours>,
}

impl From<&Branch> for GqlBranch {
    fn from(b: &Branch) -> Self {
        GqlBranch {
            id: b.id.clone(),
            location_id: b.location_id.clone(),
            name: (&b.name).into(),
            address: b.address.as_ref().map(Into::into),
            city: (&b.city).into(),
            coordinates: b.coordinates.as_ref().map(|c| GqlCoordinates {
                lat: c.lat,
                lng: c.lng,
            }),
            phone: b.phone.clone(),
            hours: b.hours.as_ref().map(|h| GqlOpeningHours {
                open: h.open.clone(),
                close: h.close.clone(),
            }),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All locations in catalog order.
    async fn locations(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlLocation>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.locations().iter().map(GqlLocation::from).collect())
    }

    async fn location(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<GqlLocation>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.location(&id).map(GqlLocation::from))
    }

    /// Branches in catalog order, optionally restricted to one location.
    async fn branches(
        &self,
        ctx: &Context<'_>,
        location_id: Option<ID>,
    ) -> async_graphql::Result<Vec<GqlBranch>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        let branches = match location_id {
            Some(id) => catalog
                .branches_for(&id)
                .into_iter()
                .map(GqlBranch::from)
                .collect(),
            None => catalog.branches().iter().map(GqlBranch::from).collect(),
        };
        Ok(branches)
    }

    async fn branch(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<GqlBranch>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.branch(&id).map(GqlBranch::from))
    }
}

pub type Schema = async_graphql::Schema<
    QueryRoot,
    async_graphql::EmptyMutation,
    async_graphql::EmptySubscription,
>;

pub fn build_schema(catalog: Arc<Catalog>) -> Schema {
    async_graphql::Schema::build(
        QueryRoot,
        async_graphql::EmptyMutation,
        async_graphql::EmptySubscription,
    )
    .data(catalog)
    .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meem_shared::models::{Coordinates, LocalizedText, OpeningHours};
    use serde_json::json;

    fn test_catalog() -> Arc<Catalog> {
        let locations = vec![
            Location {
                id: "saudi-arabia".to_string(),
                code: "SA".to_string(),
                name: LocalizedText::new("Saudi Arabia", "السعودية"),
                flag: None,
            },
            Location {
                id: "kuwait".to_string(),
                code: "KW".to_string(),
                name: LocalizedText::new("Kuwait", "الكويت"),
                flag: None,
            },
        ];
        let branches = vec![
            Branch {
                id: "riyadh-olaya".to_string(),
                location_id: "saudi-arabia".to_string(),
                name: LocalizedText::new("Riyadh - Olaya", "الرياض - العليا"),
                address: Some(LocalizedText::new("Olaya Street", "شارع العليا")),
                city: LocalizedText::new("Riyadh", "الرياض"),
                coordinates: Some(Coordinates {
                    lat: Some(24.7136),
                    lng: Some(46.6753),
                }),
                phone: Some("+966 11 123 4567".to_string()),
                hours: Some(OpeningHours {
                    open: "08:00".to_string(),
                    close: "23:00".to_string(),
                }),
            },
            Branch {
                id: "kuwait-city-jahra".to_string(),
                location_id: "kuwait".to_string(),
                name: LocalizedText::new(
                    "Kuwait City - Jahra",
                    "مدينة الكويت - الجهراء",
                ),
                address: None,
                city: LocalizedText::new("Kuwait City", "مدينة الكويت"),
                coordinates: None,
                phone: None,
                hours: None,
            },
        ];
        Arc::new(Catalog::new(locations, branches).unwrap())
    }

    async fn run(query: &str) -> serde_json::Value {
        let schema = build_schema(test_catalog());
        let resp = schema.execute(query).await;
        assert!(resp.errors.is_empty(), "errors: {:?}", resp.errors);
        resp.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn test_locations_in_catalog_order() {
        let data = run("{ locations { id code name { en ar } } }").await;
        assert_eq!(
            data,
            json!({
                "locations": [
                    {"id": "saudi-arabia", "code": "SA", "name": {"en": "Saudi Arabia", "ar": "السعودية"}},
                    {"id": "kuwait", "code": "KW", "name": {"en": "Kuwait", "ar": "الكويت"}},
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_branches_filtered_by_location() {
        let data = run(r#"{ branches(locationId: "kuwait") { id locationId } }"#).await;
        assert_eq!(
            data,
            json!({"branches": [{"id": "kuwait-city-jahra", "locationId": "kuwait"}]})
        );
    }

    #[tokio::test]
    async fn test_branch_fields_are_camel_cased() {
        let data = run(
            r#"{ branch(id: "riyadh-olaya") {
                locationId coordinates { lat lng } phone hours { open close }
            } }"#,
        )
        .await;
        assert_eq!(
            data["branch"],
            json!({
                "locationId": "saudi-arabia",
                "coordinates": {"lat": 24.7136, "lng": 46.6753},
                "phone": "+966 11 123 4567",
                "hours": {"open": "08:00", "close": "23:00"},
            })
        );
    }

    #[tokio::test]
    async fn test_optional_fields_are_null() {
        let data = run(r#"{ branch(id: "kuwait-city-jahra") { address { en } coordinates { lat } } }"#)
            .await;
        assert_eq!(
            data["branch"],
            json!({"address": null, "coordinates": null})
        );
    }

    #[tokio::test]
    async fn test_unknown_ids_resolve_to_null() {
        let data = run(r#"{ location(id: "oman") { id } branch(id: "muscat") { id } }"#).await;
        assert_eq!(data, json!({"location": null, "branch": null}));
    }

    #[tokio::test]
    async fn test_unknown_location_filter_is_empty() {
        let data = run(r#"{ branches(locationId: "oman") { id } }"#).await;
        assert_eq!(data, json!({"branches": []}));
    }
}
