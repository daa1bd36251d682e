//! Black-box HTTP tests: real router, real listener, real JWTs.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use congregate_api::{AppServices, CONCEALED_BODY, build_app_with, default_policy_table};
use congregate_auth::{JwtClaims, OrgRole};
use congregate_core::{OrgId, UserId};
use congregate_entitlements::TierRef;
use congregate_gating::{Membership, MembershipDirectory, Organization};
use congregate_projection::{Leader, Sermon};

const SECRET: &str = "black-box-test-secret";

struct TestServer {
    base: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn spawn(services: Arc<AppServices>) -> Self {
        let app = build_app_with(services, SECRET.as_bytes());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

fn mint_jwt(user: UserId) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user,
        issued_at: now - Duration::minutes(1),
        expires_at: now + Duration::hours(1),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn seed_org(services: &Arc<AppServices>, slug: &str, tier: &str) -> Organization {
    let org = Organization {
        id: OrgId::new(),
        slug: slug.to_string(),
        name: format!("{slug} church"),
        about: Some("a congregation".to_string()),
        city: Some("Springfield".to_string()),
        website: None,
        tier: TierRef::new(tier),
        created_at: Utc::now(),
        deleted_at: None,
    };
    services.directory.insert_organization(org.clone()).unwrap();
    org
}

fn seed_member(services: &Arc<AppServices>, org_id: OrgId, role: OrgRole) -> UserId {
    let user = UserId::new();
    services
        .directory
        .upsert_membership(Membership {
            org_id,
            user_id: user,
            role,
            since: Utc::now(),
        })
        .unwrap();
    user
}

// Concealment uniformity: anonymous, insufficient role, and nonexistent org
// all get the same status and the same bytes.
#[tokio::test]
async fn admin_routes_conceal_uniformly() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "first-light", "t_full");
    let admin = seed_member(&services, org.id, OrgRole::Admin);
    let member = seed_member(&services, org.id, OrgRole::Member);
    let server = TestServer::spawn(services).await;

    let path = format!("/org-admin/{}/membership-requests", org.id);

    let anonymous = server.client.get(server.url(&path)).send().await.unwrap();
    assert_eq!(anonymous.status(), 404);
    let anonymous_body = anonymous.bytes().await.unwrap();

    let wrong_role = server
        .client
        .get(server.url(&path))
        .bearer_auth(mint_jwt(member))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_role.status(), 404);
    assert_eq!(wrong_role.bytes().await.unwrap(), anonymous_body);

    let missing_org = server
        .client
        .get(server.url(&format!(
            "/org-admin/{}/membership-requests",
            OrgId::new()
        )))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_org.status(), 404);
    assert_eq!(missing_org.bytes().await.unwrap(), anonymous_body);

    let garbage_org = server
        .client
        .get(server.url("/org-admin/not-a-uuid/membership-requests"))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap();
    assert_eq!(garbage_org.status(), 404);
    assert_eq!(garbage_org.bytes().await.unwrap(), anonymous_body);

    assert_eq!(&anonymous_body[..], CONCEALED_BODY.as_bytes());

    // and the authorized caller gets through
    let allowed = server
        .client
        .get(server.url(&path))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}

#[tokio::test]
async fn soft_deleted_org_resolves_as_nonexistent() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "gone", "t_standard");
    let admin = seed_member(&services, org.id, OrgRole::Owner);
    services.directory.mark_deleted(org.id, Utc::now()).unwrap();
    let server = TestServer::spawn(services).await;

    let public = server
        .client
        .get(server.url("/orgs/gone"))
        .send()
        .await
        .unwrap();
    assert_eq!(public.status(), 404);
    assert_eq!(public.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());

    let gated = server
        .client
        .get(server.url(&format!("/org-admin/{}/members", org.id)))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap();
    assert_eq!(gated.status(), 404);
    assert_eq!(gated.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());
}

#[tokio::test]
async fn public_profile_exposes_flags_but_never_tier() {
    let services = AppServices::in_memory(default_policy_table());
    seed_org(&services, "hillside", "t_standard");
    let server = TestServer::spawn(services).await;

    let resp = server
        .client
        .get(server.url("/orgs/hillside"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let text = resp.text().await.unwrap();
    for needle in ["tier", "plan", "billing", "t_standard", "deletedAt"] {
        assert!(!text.contains(needle), "leaked {needle} in {text}");
    }

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["capabilities"]["userRole"], "none");
    assert_eq!(body["capabilities"]["canRequestMembership"], false);
    assert_eq!(body["capabilities"]["featureFlags"]["org.sermons"], true);
    assert_eq!(body["capabilities"]["featureFlags"]["org.ordinations"], false);
    assert_eq!(body["organization"]["slug"], "hillside");
}

#[tokio::test]
async fn affiliation_claim_enables_membership_request_capability() {
    let services = AppServices::in_memory(default_policy_table());
    seed_org(&services, "riverside", "t_standard");
    let server = TestServer::spawn(services).await;
    let token = mint_jwt(UserId::new());

    let unaffiliated: Value = server
        .client
        .get(server.url("/orgs/riverside"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unaffiliated["capabilities"]["canRequestMembership"], false);

    let affiliated: Value = server
        .client
        .get(server.url("/orgs/riverside?affiliated=true"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(affiliated["capabilities"]["userRole"], "visitor");
    assert_eq!(affiliated["capabilities"]["canRequestMembership"], true);
}

#[tokio::test]
async fn membership_request_lifecycle() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "oakwood", "t_standard");
    let admin = seed_member(&services, org.id, OrgRole::Admin);
    let server = TestServer::spawn(services).await;

    let applicant = UserId::new();
    let token = mint_jwt(applicant);

    let anonymous = server
        .client
        .post(server.url("/orgs/oakwood/membership-requests"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), 401);

    let submitted = server
        .client
        .post(server.url("/orgs/oakwood/membership-requests"))
        .bearer_auth(&token)
        .json(&json!({ "notes": "long-time attendee" }))
        .send()
        .await
        .unwrap();
    assert_eq!(submitted.status(), 201);
    let submitted: Value = submitted.json().await.unwrap();
    assert_eq!(submitted["status"], "pending");
    let request_id = submitted["id"].as_str().unwrap().to_string();

    // duplicate pending request is a conflict, not a second row
    let duplicate = server
        .client
        .post(server.url("/orgs/oakwood/membership-requests"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), 400);
    let duplicate: Value = duplicate.json().await.unwrap();
    assert_eq!(duplicate["error"], "conflict");

    // pending request is reflected in capabilities
    let caps: Value = server
        .client
        .get(server.url("/orgs/oakwood?affiliated=true"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(caps["capabilities"]["hasPendingMembershipRequest"], true);
    assert_eq!(caps["capabilities"]["canRequestMembership"], false);

    let pending: Value = server
        .client
        .get(server.url(&format!("/org-admin/{}/membership-requests", org.id)))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let approved: Value = server
        .client
        .post(server.url(&format!(
            "/org-admin/{}/membership-requests/{request_id}/approve",
            org.id
        )))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(approved["status"], "approved");

    // the applicant is now a member
    let caps: Value = server
        .client
        .get(server.url("/orgs/oakwood"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(caps["capabilities"]["userRole"], "member");
    assert_eq!(caps["capabilities"]["canRequestMembership"], false);

    // decided requests are immutable
    let again = server
        .client
        .post(server.url(&format!(
            "/org-admin/{}/membership-requests/{request_id}/decline",
            org.id
        )))
        .bearer_auth(mint_jwt(admin))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 400);
    let again: Value = again.json().await.unwrap();
    assert_eq!(again["error"], "invalid_state");
}

#[tokio::test]
async fn application_snapshot_survives_program_edits() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "stjohns", "t_full");
    let admin = seed_member(&services, org.id, OrgRole::Owner);
    let server = TestServer::spawn(services).await;
    let admin_token = mint_jwt(admin);

    let schema_v1 = json!({ "fields": [{ "name": "testimony", "type": "text" }] });
    let program: Value = server
        .client
        .post(server.url(&format!("/org-admin/{}/ordination-programs", org.id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "title": "Deacon track", "formSchema": schema_v1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(program["schemaVersion"], 1);
    let program_id = program["id"].as_str().unwrap().to_string();

    let applicant = UserId::new();
    let applicant_token = mint_jwt(applicant);
    let application = server
        .client
        .post(server.url(&format!("/ordination-programs/{program_id}/applications")))
        .bearer_auth(&applicant_token)
        .json(&json!({ "answers": { "testimony": "..." } }))
        .send()
        .await
        .unwrap();
    assert_eq!(application.status(), 201);
    let application: Value = application.json().await.unwrap();
    assert_eq!(application["programSchemaVersion"], 1);

    // edit the form; the program version bumps
    let schema_v2 = json!({ "fields": [{ "name": "references", "type": "list" }] });
    let updated: Value = server
        .client
        .patch(server.url(&format!(
            "/org-admin/{}/ordination-programs/{program_id}",
            org.id
        )))
        .bearer_auth(&admin_token)
        .json(&json!({ "formSchema": schema_v2 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["schemaVersion"], 2);

    // the application keeps its submission-time snapshot
    let mine: Value = server
        .client
        .get(server.url("/me/ordination-applications"))
        .bearer_auth(&applicant_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mine = &mine.as_array().unwrap()[0];
    assert_eq!(mine["programSchemaVersion"], 1);
    assert_eq!(mine["programSchemaSnapshot"], schema_v1);

    // a second open application to the same program is a conflict
    let second = server
        .client
        .post(server.url(&format!("/ordination-programs/{program_id}/applications")))
        .bearer_auth(&applicant_token)
        .json(&json!({ "answers": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 400);
}

#[tokio::test]
async fn review_trail_is_append_only_until_terminal() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "trinity", "t_full");
    let admin = seed_member(&services, org.id, OrgRole::Admin);
    let server = TestServer::spawn(services).await;
    let admin_token = mint_jwt(admin);

    let program: Value = server
        .client
        .post(server.url(&format!("/org-admin/{}/ordination-programs", org.id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "title": "Elder track", "formSchema": {} }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let program_id = program["id"].as_str().unwrap().to_string();

    let applicant_token = mint_jwt(UserId::new());
    let application: Value = server
        .client
        .post(server.url(&format!("/ordination-programs/{program_id}/applications")))
        .bearer_auth(&applicant_token)
        .json(&json!({ "answers": {} }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let application_id = application["id"].as_str().unwrap().to_string();

    let begun: Value = server
        .client
        .post(server.url(&format!(
            "/org-admin/{}/ordination-applications/{application_id}/begin",
            org.id
        )))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(begun["status"], "under_review");

    let reviews_url = server.url(&format!(
        "/org-admin/{}/ordination-applications/{application_id}/reviews",
        org.id
    ));

    let info = server
        .client
        .post(&reviews_url)
        .bearer_auth(&admin_token)
        .json(&json!({ "decision": "request_info", "notes": "need references" }))
        .send()
        .await
        .unwrap();
    assert_eq!(info.status(), 201);

    // request_info loops back to the applicant, not terminal
    let mine: Value = server
        .client
        .get(server.url("/me/ordination-applications"))
        .bearer_auth(&applicant_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine.as_array().unwrap()[0]["status"], "request_info");

    let approve = server
        .client
        .post(&reviews_url)
        .bearer_auth(&admin_token)
        .json(&json!({ "decision": "approve" }))
        .send()
        .await
        .unwrap();
    assert_eq!(approve.status(), 201);

    // both reviews remain, in submission order
    let trail: Value = server
        .client
        .get(&reviews_url)
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let trail = trail.as_array().unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0]["decision"], "request_info");
    assert_eq!(trail[1]["decision"], "approve");

    // terminal applications accept no further reviews
    let after_terminal = server
        .client
        .post(&reviews_url)
        .bearer_auth(&admin_token)
        .json(&json!({ "decision": "reject" }))
        .send()
        .await
        .unwrap();
    assert_eq!(after_terminal.status(), 400);
    let after_terminal: Value = after_terminal.json().await.unwrap();
    assert_eq!(after_terminal["error"], "invalid_state");
}

#[tokio::test]
async fn ordination_surface_conceals_without_the_feature() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "plainfield", "t_standard");
    let admin = seed_member(&services, org.id, OrgRole::Owner);
    let server = TestServer::spawn(services).await;

    let public = server
        .client
        .get(server.url("/orgs/plainfield/ordination-programs"))
        .send()
        .await
        .unwrap();
    assert_eq!(public.status(), 404);
    assert_eq!(public.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());

    // even an authorized admin cannot manage programs: the workflow itself
    // resolves as nonexistent without the feature
    let create = server
        .client
        .post(server.url(&format!("/org-admin/{}/ordination-programs", org.id)))
        .bearer_auth(mint_jwt(admin))
        .json(&json!({ "title": "Deacon track", "formSchema": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status(), 404);
    assert_eq!(create.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());
}

#[tokio::test]
async fn meeting_requests_follow_the_forward_lifecycle() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "bethel", "t_full");
    let member = seed_member(&services, org.id, OrgRole::Member);
    let moderator = seed_member(&services, org.id, OrgRole::Moderator);
    let server = TestServer::spawn(services).await;
    let moderator_token = mint_jwt(moderator);

    let created = server
        .client
        .post(server.url("/orgs/bethel/meeting-requests"))
        .bearer_auth(mint_jwt(member))
        .json(&json!({ "topic": "premarital counseling" }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["status"], "new");
    let id = created["id"].as_str().unwrap().to_string();

    let listed: Value = server
        .client
        .get(server.url(&format!("/org-leader/{}/meeting-requests", org.id)))
        .bearer_auth(&moderator_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let transition_url = server.url(&format!(
        "/org-leader/{}/meeting-requests/{id}/transition",
        org.id
    ));

    let first: Value = server
        .client
        .post(&transition_url)
        .bearer_auth(&moderator_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["status"], "in_progress");
    assert!(first["closedBy"].is_null());

    let second: Value = server
        .client
        .post(&transition_url)
        .bearer_auth(&moderator_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["status"], "closed");
    assert!(!second["closedBy"].is_null());

    let third = server
        .client
        .post(&transition_url)
        .bearer_auth(&moderator_token)
        .send()
        .await
        .unwrap();
    assert_eq!(third.status(), 400);
}

#[tokio::test]
async fn meeting_surface_is_invisible_without_the_feature() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "maple", "t_standard");
    let member = seed_member(&services, org.id, OrgRole::Member);
    let moderator = seed_member(&services, org.id, OrgRole::Moderator);
    let server = TestServer::spawn(services).await;

    let create = server
        .client
        .post(server.url("/orgs/maple/meeting-requests"))
        .bearer_auth(mint_jwt(member))
        .json(&json!({ "topic": "visit" }))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status(), 404);
    assert_eq!(create.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());

    // even an authorized leader sees nothing: the flag conceals the surface
    let list = server
        .client
        .get(server.url(&format!("/org-leader/{}/meeting-requests", org.id)))
        .bearer_auth(mint_jwt(moderator))
        .send()
        .await
        .unwrap();
    assert_eq!(list.status(), 404);
    assert_eq!(list.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());
}

#[tokio::test]
async fn content_routes_project_only_public_fields() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "grace", "t_standard");
    services
        .content
        .insert_sermon(Sermon {
            id: uuid::Uuid::now_v7(),
            org_id: org.id,
            title: "On patience".to_string(),
            speaker: "J. Alvarez".to_string(),
            delivered_at: Utc::now(),
            video_url: Some("https://cdn.example/sermon.mp4".to_string()),
            storage_asset_id: Some("asset-93".to_string()),
            view_count: 412,
            deleted_at: None,
        })
        .unwrap();
    services
        .content
        .insert_leader(Leader {
            id: uuid::Uuid::now_v7(),
            org_id: org.id,
            name: "M. Okafor".to_string(),
            title: "Senior Pastor".to_string(),
            bio: None,
            photo_url: None,
            contact_email: Some("okafor@grace.example".to_string()),
            deleted_at: None,
        })
        .unwrap();
    let bare = seed_org(&services, "plainview", "t_basic");
    let _ = bare;
    let server = TestServer::spawn(services).await;

    let resp = server
        .client
        .get(server.url("/orgs/grace/sermons"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let text = resp.text().await.unwrap();
    assert!(text.contains("On patience"));
    for needle in ["storageAssetId", "viewCount", "deletedAt", "asset-93"] {
        assert!(!text.contains(needle), "leaked {needle} in {text}");
    }

    // leader listings sit behind their own flag and drop contact details
    let leaders = server
        .client
        .get(server.url("/orgs/grace/leaders"))
        .send()
        .await
        .unwrap();
    assert_eq!(leaders.status(), 200);
    let text = leaders.text().await.unwrap();
    assert!(text.contains("M. Okafor"));
    for needle in ["contactEmail", "okafor@grace.example"] {
        assert!(!text.contains(needle), "leaked {needle} in {text}");
    }

    // a tier without the flags conceals the routes entirely
    for path in ["/orgs/plainview/sermons", "/orgs/plainview/leaders"] {
        let concealed = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(concealed.status(), 404);
        assert_eq!(concealed.bytes().await.unwrap(), CONCEALED_BODY.as_bytes());
    }
}

#[tokio::test]
async fn member_administration_protects_owners() {
    let services = AppServices::in_memory(default_policy_table());
    let org = seed_org(&services, "calvary", "t_standard");
    let owner = seed_member(&services, org.id, OrgRole::Owner);
    let admin = seed_member(&services, org.id, OrgRole::Admin);
    let member = seed_member(&services, org.id, OrgRole::Member);
    let server = TestServer::spawn(services).await;
    let admin_token = mint_jwt(admin);

    // an admin cannot change an owner's role
    let demote_owner = server
        .client
        .patch(server.url(&format!("/org-admin/{}/members/{owner}/role", org.id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "member" }))
        .send()
        .await
        .unwrap();
    assert_eq!(demote_owner.status(), 400);

    // nor remove the owner
    let remove_owner = server
        .client
        .delete(server.url(&format!("/org-admin/{}/members/{owner}", org.id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(remove_owner.status(), 400);

    // promoting a member works
    let promote: Value = server
        .client
        .patch(server.url(&format!("/org-admin/{}/members/{member}/role", org.id)))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "moderator" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(promote["role"], "moderator");

    // removal works for non-owners and lands in the audit trail
    let remove = server
        .client
        .delete(server.url(&format!("/org-admin/{}/members/{member}", org.id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(remove.status(), 204);

    let activity: Value = server
        .client
        .get(server.url(&format!("/org-admin/{}/activity", org.id)))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let actions: Vec<&str> = activity
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"member.role_changed"));
    assert!(actions.contains(&"member.removed"));
}

#[tokio::test]
async fn invalid_bearer_token_is_rejected_before_routing() {
    let services = AppServices::in_memory(default_policy_table());
    seed_org(&services, "elmwood", "t_standard");
    let server = TestServer::spawn(services).await;

    let resp = server
        .client
        .get(server.url("/orgs/elmwood"))
        .bearer_auth("not.a.jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
