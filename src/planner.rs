use thiserror::Error;

use crate::itinerary::itineraries;
use crate::models::JourneyResponse;
use crate::planets::{shortest_route, Planet};
use crate::store::{encode_timestamp, Store};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("origin and destination are both {0}")]
    SamePlanet(Planet),
    #[error("no price list has been fetched yet")]
    NoPricelist,
    #[error("no route from {from} to {to}")]
    NoRoute { from: Planet, to: Planet },
    #[error("no providers found for {from} -> {to}")]
    NoProviders { from: Planet, to: Planet },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Search the latest price list for journeys between two planets.
///
/// Results are cached per price list, so a repeated search is answered from
/// the cache until a newer list arrives.
pub async fn plan_journeys(store: &Store, from: Planet, to: Planet) -> Result<JourneyResponse, PlanError> {
    if from == to {
        return Err(PlanError::SamePlanet(from));
    }

    let pricelist = store.latest_pricelist().await?.ok_or(PlanError::NoPricelist)?;

    if let Some(cached) = store.cached_journeys(&pricelist.id, from, to).await? {
        tracing::debug!("Serving cached journeys {} -> {} from {}", from, to, pricelist.id);
        return Ok(cached);
    }

    let hops = shortest_route(from, to).ok_or(PlanError::NoRoute { from, to })?;

    let mut total_distance = 0i64;
    let mut offers = Vec::with_capacity(hops.len());
    for hop in &hops {
        let hop_offers = store.hop_offers(&pricelist.id, hop.from, hop.to).await?;
        if hop_offers.offers.is_empty() {
            tracing::info!("No providers for hop {} -> {} in {}", hop.from, hop.to, pricelist.id);
            return Err(PlanError::NoProviders {
                from: hop.from,
                to: hop.to,
            });
        }
        total_distance += hop_offers.distance;
        offers.push(hop_offers.offers);
    }

    let response = JourneyResponse {
        total_distance: total_distance.to_string(),
        valid_until: encode_timestamp(pricelist.valid_until),
        pricelist_id: pricelist.id.clone(),
        possible_routes: itineraries(&offers),
    };

    store.cache_journeys(&pricelist.id, from, to, &response).await?;

    tracing::info!(
        "Planned {} journeys {} -> {} over {} hops",
        response.possible_routes.len(),
        from,
        to,
        hops.len()
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{base_time, sample_pricelist, temp_store};
    use chrono::Duration;

    #[tokio::test]
    async fn test_same_planet_rejected() {
        let (store, _dir) = temp_store().await;
        let err = plan_journeys(&store, Planet::Earth, Planet::Earth).await.unwrap_err();
        assert!(matches!(err, PlanError::SamePlanet(Planet::Earth)));
    }

    #[tokio::test]
    async fn test_no_pricelist() {
        let (store, _dir) = temp_store().await;
        let err = plan_journeys(&store, Planet::Earth, Planet::Mars).await.unwrap_err();
        assert!(matches!(err, PlanError::NoPricelist));
    }

    #[tokio::test]
    async fn test_plan_multi_hop_journey() {
        let (store, _dir) = temp_store().await;
        let valid_until = base_time() + Duration::days(1);
        store
            .insert_pricelist(&sample_pricelist("pl-1", valid_until), 15)
            .await
            .unwrap();

        let response = plan_journeys(&store, Planet::Earth, Planet::Mars).await.unwrap();

        assert_eq!(response.pricelist_id, "pl-1");
        assert_eq!(response.total_distance, (628_730_000i64 + 550_390_000).to_string());
        assert_eq!(response.valid_until, encode_timestamp(valid_until));
        // Only the SpaceX flight lands before the Jupiter -> Mars departure.
        assert_eq!(response.possible_routes.len(), 1);
        let route = &response.possible_routes[0];
        assert_eq!(route.total_price, "150.50");
        assert_eq!(route.total_duration, "1 days, 2 hours, 0 minutes");
        let companies: Vec<&str> = route.providers.iter().map(|p| p.company_name.as_str()).collect();
        assert_eq!(companies, vec!["SpaceX", "Explore Origin"]);
    }

    #[tokio::test]
    async fn test_plan_is_cached() {
        let (store, _dir) = temp_store().await;
        store
            .insert_pricelist(&sample_pricelist("pl-1", base_time() + Duration::days(1)), 15)
            .await
            .unwrap();

        let first = plan_journeys(&store, Planet::Earth, Planet::Jupiter).await.unwrap();
        let cached = store
            .cached_journeys("pl-1", Planet::Earth, Planet::Jupiter)
            .await
            .unwrap();
        assert_eq!(cached.as_ref(), Some(&first));

        let second = plan_journeys(&store, Planet::Earth, Planet::Jupiter).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.possible_routes.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_hop_reports_no_providers() {
        let (store, _dir) = temp_store().await;
        store
            .insert_pricelist(&sample_pricelist("pl-1", base_time() + Duration::days(1)), 15)
            .await
            .unwrap();

        let err = plan_journeys(&store, Planet::Earth, Planet::Uranus).await.unwrap_err();
        match err {
            PlanError::NoProviders { from, to } => {
                assert_eq!(from, Planet::Earth);
                assert_eq!(to, Planet::Uranus);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
