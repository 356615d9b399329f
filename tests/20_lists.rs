mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn groceries_walkthrough() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;

    let id = server.create_list(&alice, "Groceries").await?;
    let detail = format!("/{}/", id);

    let res = server.post(&detail, &alice, &[("description", "Milk")]).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res).as_deref(), Some(detail.as_str()));

    let page = server.page(&detail, &alice).await?;
    assert_eq!(page["data"]["list"]["title"], "Groceries");
    assert_eq!(page["data"]["tasks"][0]["description"], "Milk");
    assert_eq!(page["data"]["tasks"][0]["done"], false);

    let index = server.page("/", &alice).await?;
    assert_eq!(index["data"]["lists"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn other_users_cannot_touch_a_list() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;
    let bob = server.user("bob")?;
    let id = server.create_list(&alice, "Groceries").await?;

    for path in [format!("/{}/", id), format!("/{}/edit/", id), format!("/{}/sort/", id), format!("/{}/delete/", id)] {
        let res = server.get(&path, &bob).await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "GET {}", path);
    }

    let res = server.post(&format!("/{}/edit/", id), &bob, &[("title", "Hijacked")]).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let page = server.page(&format!("/{}/", id), &alice).await?;
    assert_eq!(page["data"]["list"]["title"], "Groceries");

    let index = server.page("/", &bob).await?;
    assert_eq!(index["data"]["lists"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn delete_list_returns_home() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;
    let id = server.create_list(&alice, "Chores").await?;

    let res = server.post(&format!("/{}/delete/", id), &alice, &[]).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res).as_deref(), Some("/"));

    let res = server.get(&format!("/{}/", id), &alice).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn sort_criterion_reorders_detail() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.user("alice")?;
    let id = server.create_list(&alice, "Groceries").await?;
    let detail = format!("/{}/", id);

    for description in ["pears", "Apples"] {
        server.post(&detail, &alice, &[("description", description)]).await?;
    }

    let res = server
        .post(&format!("/{}/sort/", id), &alice, &[("sort_criterion", "alphabetical")])
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let page = server.page(&detail, &alice).await?;
    assert_eq!(page["data"]["list"]["sort_criterion"], "alphabetical");
    assert_eq!(page["data"]["tasks"][0]["description"], "Apples");
    assert_eq!(page["data"]["tasks"][1]["description"], "pears");
    Ok(())
}
