//! Examples for using the Calculator Server API
//!
//! Start the server first (`cargo run -p calc-server`), then run
//! `cargo run -p calc-server --example api_client`.

use reqwest::Client;

const SERVER_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // reqwest encodes `+` as %2B, so it is not confused with a space
    let cases = [
        ("3", "4", "+"),
        ("10", "4", "-"),
        ("5", "2", "x"),
        ("9", "4", "/"),
        ("10", "0", "/"),
        ("abc", "2", "+"),
        ("5", "2", "%"),
    ];

    for (i, (num1, num2, operation)) in cases.iter().enumerate() {
        println!("{}. {num1} {operation} {num2}:", i + 2);
        let resp = client
            .get(format!("{SERVER_URL}/calculate"))
            .query(&[("num1", num1), ("num2", num2), ("operation", operation)])
            .send()
            .await?;
        println!("Status: {}", resp.status());
        println!("Body: {}", resp.text().await?);
        println!();
    }

    println!("{}. OpenAPI document:", cases.len() + 2);
    let resp = client
        .get(format!("{SERVER_URL}/api-docs/openapi.json"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    let doc: serde_json::Value = resp.json().await?;
    println!("Title: {}", doc["info"]["title"]);

    Ok(())
}
