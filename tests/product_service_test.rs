use anyhow::Result;
use httpmock::prelude::*;
use ozon_seller::{Pagination, ProductService, SellerError, ServiceConfig, Sort};
use serde_json::json;

fn service(server: &MockServer) -> Result<ProductService> {
    Ok(ProductService::new(ServiceConfig::new("836", "secret-key", server.base_url()))?)
}

/// 庫存查詢：body 欄位順序固定，並帶上憑證 header
#[tokio::test]
async fn test_import_stocks_sends_exact_body_and_credentials() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v3/products/stocks")
                .header("Client-Id", "836")
                .header("Api-Key", "secret-key")
                .header("content-type", "application/json")
                .body(r#"{"filter":{"offer_id":"ABC"},"last_id":"","limit":100}"#);
            then.status(200)
                .json_body(json!({"result": {"items": [{"offer_id": "ABC"}], "last_id": "WzEwXQ=="}}));
        })
        .await;

    let filter = json!({"offer_id": "ABC", "ignored": true});
    let result = service(&server)?
        .import_stocks(filter.as_object().unwrap(), &Pagination::default())
        .await?;

    mock.assert_async().await;
    assert_eq!(result["last_id"], "WzEwXQ==");
    Ok(())
}

#[tokio::test]
async fn test_info_attributes_keeps_cursor() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v3/products/info/attributes").json_body(json!({
                "filter": {"visibility": "ALL"},
                "last_id": "",
                "limit": 50,
                "sort_by": "product_id",
                "sort_dir": "desc"
            }));
            then.status(200)
                .json_body(json!({"result": [{"id": 1}], "total": 500, "last_id": "WzEwMF0="}));
        })
        .await;

    let filter = json!({"visibility": "all"});
    let page = service(&server)?
        .info_attributes(filter.as_object().unwrap(), &Pagination::new("", 50)?, &Sort::default())
        .await?;

    mock.assert_async().await;
    assert_eq!(page["result"], json!([{"id": 1}]));
    assert_eq!(page["total"], 500);

    // 用回傳的游標取下一頁
    let next = Pagination::new(page["last_id"].as_str().unwrap_or_default(), 50)?;
    assert_eq!(next.last_id(), "WzEwMF0=");
    Ok(())
}

#[tokio::test]
async fn test_import_single_item_is_wrapped() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v3/product/import")
                .body_contains(r#"{"items":[{"offer_id":"ABC-1","#);
            then.status(200).json_body(json!({"result": {"task_id": 172549793}}));
        })
        .await;

    let item = json!({
        "offer_id": "ABC-1",
        "name": "Kettle",
        "category_id": 17036076,
        "price": "1200",
        "vat": "0",
        "height": 250,
        "depth": 200,
        "width": 150,
        "dimension_unit": "mm",
        "weight": 900,
        "weight_unit": "g",
        "images": ["https://cdn.example.com/kettle.jpg"],
        "attributes": [{"complex_id": 0, "id": 85, "values": [{"value": "Acme"}]}]
    });

    let result = service(&server)?.import(item, true).await?;

    mock.assert_async().await;
    assert_eq!(result["task_id"], 172549793);
    Ok(())
}

#[test]
fn test_limit_out_of_range_is_rejected() {
    for limit in [0, 1001] {
        let err = Pagination::new("", limit).unwrap_err();
        assert!(matches!(err, SellerError::InvalidInput { ref field, .. } if field == "limit"));
    }
}

#[tokio::test]
async fn test_invalid_item_sends_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let err = service(&server)?
        .import(json!([{"offer_id": "ABC-1"}]), true)
        .await
        .unwrap_err();
    assert!(!err.violations().is_empty());

    mock.assert_hits_async(0).await;
    Ok(())
}
