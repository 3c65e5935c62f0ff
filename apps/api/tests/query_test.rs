//! Integration tests for query resolvers
//!
//! Runs documents through the schema against the in-memory backend and
//! checks the JSON bodies a client would receive.

mod common;

use common::*;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[case("user")]
#[case("post")]
#[case("profile")]
#[tokio::test]
async fn test_missing_record_resolves_to_null(#[case] field: &str) {
    let ctx = TestContext::new();
    let query = format!("query($id: UUID!) {{ {}(id: $id) {{ id }} }}", field);

    let body = ctx
        .run_with(&query, json!({ "id": Uuid::new_v4() }))
        .await;

    let data = expect_data(&body);
    assert!(data[field].is_null());
}

#[rstest]
#[case("users")]
#[case("posts")]
#[case("profiles")]
#[case("memberTypes")]
#[tokio::test]
async fn test_empty_collection_is_empty_list(#[case] field: &str) {
    let ctx = TestContext::empty();

    let body = ctx.run(&format!("{{ {} {{ id }} }}", field)).await;

    assert_eq!(expect_data(&body)[field], json!([]));
}

#[tokio::test]
async fn test_member_type_lookup_on_empty_table_is_null() {
    let ctx = TestContext::empty();

    let body = ctx.run("{ memberType(id: BUSINESS) { id } }").await;

    assert!(expect_data(&body)["memberType"].is_null());
}

#[tokio::test]
async fn test_member_types_are_seeded() {
    let ctx = TestContext::new();

    let body = ctx
        .run("{ memberTypes { id discount postsLimitPerMonth } }")
        .await;

    assert_eq!(
        expect_data(&body)["memberTypes"],
        json!([
            { "id": "BASIC", "discount": 2.3, "postsLimitPerMonth": 20 },
            { "id": "BUSINESS", "discount": 7.7, "postsLimitPerMonth": 100 },
        ])
    );
}

#[tokio::test]
async fn test_member_type_by_enum_id() {
    let ctx = TestContext::new();

    let body = ctx
        .run("{ memberType(id: BUSINESS) { id postsLimitPerMonth } }")
        .await;

    assert_eq!(
        expect_data(&body)["memberType"],
        json!({ "id": "BUSINESS", "postsLimitPerMonth": 100 })
    );
}

#[tokio::test]
async fn test_users_in_insertion_order() {
    let ctx = TestContext::new();
    for name in ["zoe", "adam", "mia"] {
        create_user(&ctx.db, name, 1.0).await;
    }

    let body = ctx.run("{ users { name } }").await;

    assert_eq!(
        expect_data(&body)["users"],
        json!([{ "name": "zoe" }, { "name": "adam" }, { "name": "mia" }])
    );
}

#[tokio::test]
async fn test_user_with_nested_relations() {
    let ctx = TestContext::new();
    let graph = SocialGraph::seed(&ctx.db).await;

    let body = ctx
        .run_with(
            r#"query($id: UUID!) {
                user(id: $id) {
                    name
                    balance
                    profile { isMale yearOfBirth userId memberTypeId memberType { id discount } }
                    posts { title authorId }
                    userSubscribedTo { name }
                    subscribedToUser { name }
                }
            }"#,
            json!({ "id": graph.alice.id }),
        )
        .await;

    let alice = &expect_data(&body)["user"];
    assert_eq!(alice["name"], "alice");
    assert_eq!(alice["balance"], 120.0);
    assert_eq!(alice["profile"]["userId"], graph.alice.id.to_string());
    assert_eq!(alice["profile"]["memberTypeId"], "BUSINESS");
    assert_eq!(
        alice["profile"]["memberType"],
        json!({ "id": "BUSINESS", "discount": 7.7 })
    );
    assert_eq!(alice["posts"].as_array().unwrap().len(), 2);
    assert_eq!(alice["posts"][0]["authorId"], graph.alice.id.to_string());
    assert_eq!(alice["userSubscribedTo"], json!([{ "name": "bob" }]));
    assert_eq!(
        alice["subscribedToUser"],
        json!([{ "name": "bob" }, { "name": "carol" }])
    );
}

#[tokio::test]
async fn test_subscription_direction() {
    let ctx = TestContext::new();
    let graph = SocialGraph::seed(&ctx.db).await;

    let body = ctx
        .run_with(
            "query($id: UUID!) { user(id: $id) { userSubscribedTo { name } subscribedToUser { name } } }",
            json!({ "id": graph.carol.id }),
        )
        .await;

    let carol = &expect_data(&body)["user"];
    assert_eq!(carol["userSubscribedTo"], json!([{ "name": "alice" }]));
    assert_eq!(carol["subscribedToUser"], json!([]));
}

#[tokio::test]
async fn test_user_without_profile_has_null_profile() {
    let ctx = TestContext::new();
    let user = create_user(&ctx.db, "loner", 3.0).await;

    let body = ctx
        .run_with(
            "query($id: UUID!) { user(id: $id) { profile { id } posts { id } } }",
            json!({ "id": user.id }),
        )
        .await;

    let data = expect_data(&body);
    assert!(data["user"]["profile"].is_null());
    assert_eq!(data["user"]["posts"], json!([]));
}

#[tokio::test]
async fn test_sibling_root_fields_resolve_together() {
    let ctx = TestContext::new();
    let graph = SocialGraph::seed(&ctx.db).await;

    let body = ctx
        .run_with(
            "query($id: UUID!) { user(id: $id) { name } posts { title } memberTypes { id } }",
            json!({ "id": graph.bob.id }),
        )
        .await;

    let data = expect_data(&body);
    assert_eq!(data["user"]["name"], "bob");
    assert_eq!(data["posts"].as_array().unwrap().len(), 4);
    assert_eq!(data["memberTypes"].as_array().unwrap().len(), 2);
}
