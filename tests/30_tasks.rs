mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};

#[tokio::test]
async fn toggle_follows_same_host_referer() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;
    let id = server.create_list(&alice, "Groceries").await?;
    let detail = format!("/{}/", id);
    server.post(&detail, &alice, &[("description", "Milk")]).await?;

    let page = server.page(&detail, &alice).await?;
    let task_id = page["data"]["tasks"][0]["id"].as_i64().unwrap();

    // reqwest sends Host as 127.0.0.1:<port>, matching base_url
    let referer = server.url(&detail);
    let res = server
        .client
        .post(server.url(&format!("/task/{}/toggle/", task_id)))
        .bearer_auth(&alice.token)
        .header(header::REFERER, referer)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res).as_deref(), Some(detail.as_str()));

    let page = server.page(&detail, &alice).await?;
    assert_eq!(page["data"]["tasks"][0]["done"], true);
    Ok(())
}

#[tokio::test]
async fn task_edit_and_delete_by_owner_only() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;
    let bob = server.user("bob")?;
    let id = server.create_list(&alice, "Groceries").await?;
    let detail = format!("/{}/", id);
    server.post(&detail, &alice, &[("description", "Milk")]).await?;
    let task_id = server.page(&detail, &alice).await?["data"]["tasks"][0]["id"]
        .as_i64()
        .unwrap();

    let edit = format!("/task/{}/edit/", task_id);
    let res = server.post(&edit, &bob, &[("description", "Beer")]).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.post(&edit, &alice, &[("description", "Oat milk"), ("done", "on")]).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res).as_deref(), Some("/"));

    let page = server.page(&detail, &alice).await?;
    assert_eq!(page["data"]["tasks"][0]["description"], "Oat milk");
    assert_eq!(page["data"]["tasks"][0]["done"], true);

    let res = server.post(&format!("/task/{}/delete/", task_id), &alice, &[]).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let page = server.page(&detail, &alice).await?;
    assert_eq!(page["data"]["tasks"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_task_is_unprocessable() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;
    let id = server.create_list(&alice, "Groceries").await?;

    let res = server.post(&format!("/{}/", id), &alice, &[("description", "")]).await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["description"].is_string());
    Ok(())
}
