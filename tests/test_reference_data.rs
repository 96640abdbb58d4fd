//! Integration tests for market prices and government schemes.
//!
//! Tests cover:
//! - Seeded reference data loaded by migrations
//! - Crop filtering for prices and the same-day price upsert
//! - Scheme filters by type and level, lookup by id

mod common;

use common::*;

#[tokio::test]
async fn test_seeded_market_prices() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let prices = db.get_market_prices(None).await?;
    assert_eq!(prices.len(), 8);
    assert!(prices.iter().all(|p| p.unit == "per quintal"));

    let potato = db.get_market_prices(Some("potato")).await?;
    assert_eq!(potato.len(), 4);
    assert!(potato.iter().all(|p| p.crop == "Potato"));
    let karnataka = potato.iter().find(|p| p.state == "Karnataka").unwrap();
    assert_eq!(karnataka.price, 1450.0);
    Ok(())
}

#[tokio::test]
async fn test_prices_sorted_by_state() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let tomato = db.get_market_prices(Some("Tomato")).await?;
    let states: Vec<&str> = tomato.iter().map(|p| p.state.as_str()).collect();
    assert_eq!(states, vec!["Karnataka", "Maharashtra", "Punjab", "Uttar Pradesh"]);
    Ok(())
}

#[tokio::test]
async fn test_save_market_price_upserts_same_day() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let price = NewMarketPrice {
        state: "Bihar".to_string(),
        crop: "Potato".to_string(),
        price: 1100.0,
        unit: "per quintal".to_string(),
    };
    let saved = db.save_market_price(&price).await?;
    assert_eq!(saved.price, 1100.0);

    let updated = db
        .save_market_price(&NewMarketPrice { price: 1175.5, ..price })
        .await?;
    assert_eq!(updated.price, 1175.5);

    let bihar: Vec<MarketPrice> = db
        .get_market_prices(Some("Potato"))
        .await?
        .into_iter()
        .filter(|p| p.state == "Bihar")
        .collect();
    assert_eq!(bihar.len(), 1);
    assert_eq!(bihar[0].price, 1175.5);
    Ok(())
}

#[tokio::test]
async fn test_negative_price_is_rejected() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    let result = db
        .save_market_price(&NewMarketPrice {
            state: "Bihar".to_string(),
            crop: "Tomato".to_string(),
            price: -5.0,
            unit: "per quintal".to_string(),
        })
        .await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_seeded_schemes_and_filters() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let all = db.get_government_schemes(None, None).await?;
    assert_eq!(all.len(), 5);

    let subsidies = db.get_government_schemes(Some("subsidy"), None).await?;
    assert_eq!(subsidies.len(), 2);

    let state_subsidies = db.get_government_schemes(Some("Subsidy"), Some("STATE")).await?;
    assert_eq!(state_subsidies.len(), 1);
    assert_eq!(state_subsidies[0].name, "Andhra Pradesh Irrigation Assistance Program");

    let central = db.get_government_schemes(None, Some("central")).await?;
    assert_eq!(central.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_scheme_by_id() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let scheme = db.get_government_scheme(2).await?.expect("scheme 2 is seeded");
    assert_eq!(scheme.name, "PM Fasal Bima Yojana");
    assert_eq!(scheme.scheme_type, "insurance");

    let json = serde_json::to_value(&scheme)?;
    assert_eq!(json["type"], "insurance");
    assert!(json.get("scheme_type").is_none());

    assert!(db.get_government_scheme(999).await?.is_none());
    Ok(())
}
