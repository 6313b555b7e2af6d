mod common;

#[cfg(test)]
pub mod web_tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::{StatusCode, header};
    use actix_web::web::{self, Data};
    use actix_web::{App, test};

    use super::common::*;

    use schoolpress::config::SiteConfig;
    use schoolpress::models::*;
    use schoolpress::services::{ContentService, MemoryBackend};
    use schoolpress::web::handlers::public::not_found;
    use schoolpress::web::middleware::SecurityHeaders;
    use schoolpress::web::{AppState, configure};

    fn state(backend: &Arc<MemoryBackend>) -> AppState {
        let config = SiteConfig {
            admin_secret: Some(ADMIN_SECRET.to_string()),
            ..Default::default()
        };
        AppState::with_backends(config, backend.clone(), backend.clone())
    }

    macro_rules! app {
        ($backend:expr) => {
            test::init_service(
                App::new()
                    .wrap(SecurityHeaders::new(false))
                    .app_data(Data::new(state(&$backend)))
                    .configure(configure)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    /// Registers an account and stores the admin password, returning the
    /// session cookies.
    macro_rules! admin_session {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/admin/register")
                .set_form(&[
                    ("email", "head@example.org"),
                    ("password", "letters-and-1"),
                    ("confirm_password", "letters-and-1"),
                ])
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            let mut cookies = cookies_of(&resp);

            let req = test::TestRequest::post()
                .uri("/admin/unlock")
                .set_form(&[("token", ADMIN_SECRET)])
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            cookies.extend(cookies_of(&resp));
            cookies
        }};
    }

    fn cookies_of<B>(resp: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
        resp.response().cookies().map(Cookie::into_owned).collect()
    }

    fn location<B>(resp: &ServiceResponse<B>) -> String {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    fn with_cookies(mut req: test::TestRequest, cookies: &[Cookie<'static>]) -> test::TestRequest {
        for cookie in cookies {
            req = req.cookie(cookie.clone());
        }
        req
    }

    async fn body_text<B: actix_web::body::MessageBody>(resp: ServiceResponse<B>) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
    }

    #[actix_rt::test]
    async fn test_home_renders_fallback_text() {
        let backend = backend();
        let app = app!(backend);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("x-frame-options").and_then(|v| v.to_str().ok()),
            Some("DENY")
        );

        let body = body_text(resp).await;
        assert!(body.contains("Welcome to Government School"));
        assert!(body.contains("News &amp; Notices"));
    }

    #[actix_rt::test]
    async fn test_about_page_prefers_stored_block() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        backend
            .update_content_block(
                Some(admin),
                "about-history",
                ContentBlock::new("Since 1950", "A long story"),
            )
            .await
            .expect("Failed to store block");
        let app = app!(backend);

        let req = test::TestRequest::get().uri("/about").to_request();
        let body = body_text(test::call_service(&app, req).await).await;

        assert!(body.contains("Since 1950"));
        assert!(body.contains("A long story"));
    }

    #[actix_rt::test]
    async fn test_notice_detail_and_missing_notice() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let id = backend
            .add_notice(Some(admin), &holiday_notice())
            .await
            .expect("Failed to add notice");
        let app = app!(backend);

        let req = test::TestRequest::get().uri(&format!("/notices/{}", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("Holiday"));
        assert!(body.contains("January 1, 2024"));

        for uri in ["/notices/999", "/notices/abc"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert!(body_text(resp).await.contains("Notice not found."));
        }
    }

    #[actix_rt::test]
    async fn test_empty_lists_show_empty_state() {
        let backend = backend();
        let app = app!(backend);

        let req = test::TestRequest::get().uri("/staff").to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("No staff members listed yet."));
    }

    #[actix_rt::test]
    async fn test_unknown_path_is_not_found() {
        let backend = backend();
        let app = app!(backend);

        let req = test::TestRequest::get().uri("/no-such-page").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_contact_with_missing_field_is_not_submitted() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/contact")
            .set_form(&[("name", ""), ("email", "jordan@example.org"), ("message", "Hi")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(resp).await.contains("Please fill in all required fields"));

        let submissions = backend
            .get_all_contact_submissions(Some(admin))
            .await
            .expect("Failed to list");
        assert!(submissions.is_empty());
    }

    #[actix_rt::test]
    async fn test_contact_submission_success() {
        let backend = backend();
        let admin = seed_admin(&backend).await;
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/contact")
            .set_form(&[
                ("name", "Jordan Lee"),
                ("email", "jordan@example.org"),
                ("message", "When does enrollment open?"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/contact?sent=1");

        let submissions = backend
            .get_all_contact_submissions(Some(admin))
            .await
            .expect("Failed to list");
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].name, "Jordan Lee");

        let req = test::TestRequest::get().uri("/contact?sent=1").to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Thank you for your message!"));
    }

    #[actix_rt::test]
    async fn test_admin_prompts_follow_gate_order() {
        let backend = backend();
        let app = app!(backend);

        let req = test::TestRequest::get().uri("/admin").to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Enter the admin password"));

        let req = test::TestRequest::post()
            .uri("/admin/unlock")
            .set_form(&[("token", ADMIN_SECRET)])
            .to_request();
        let cookies = cookies_of(&test::call_service(&app, req).await);

        let req = with_cookies(test::TestRequest::get().uri("/admin"), &cookies).to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Sign In"));
    }

    #[actix_rt::test]
    async fn test_admin_denied_for_wrong_password() {
        let backend = backend();
        seed_admin(&backend).await;
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/admin/register")
            .set_form(&[
                ("email", "visitor@example.org"),
                ("password", "letters-and-1"),
                ("confirm_password", "letters-and-1"),
            ])
            .to_request();
        let mut cookies = cookies_of(&test::call_service(&app, req).await);

        let req = test::TestRequest::post()
            .uri("/admin/unlock")
            .set_form(&[("token", "guess")])
            .to_request();
        cookies.extend(cookies_of(&test::call_service(&app, req).await));

        let req = with_cookies(test::TestRequest::get().uri("/admin"), &cookies).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(body_text(resp).await.contains("The password may be incorrect."));
    }

    #[actix_rt::test]
    async fn test_admin_creates_notice() {
        let backend = backend();
        let app = app!(backend);
        let cookies = admin_session!(app);

        let req = with_cookies(test::TestRequest::get().uri("/admin"), &cookies).to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Admin Dashboard"));

        let req = with_cookies(test::TestRequest::post().uri("/admin/notices/new"), &cookies)
            .set_form(&[
                ("title", "Holiday"),
                ("body", "School closed Monday"),
                ("date", "2024-01-01"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/admin?tab=notices&status=Notice%20created");

        let notices = backend.list_notices().await.expect("Failed to list");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].date, date("2024-01-01"));
    }

    #[actix_rt::test]
    async fn test_admin_form_keeps_draft_on_missing_fields() {
        let backend = backend();
        let app = app!(backend);
        let cookies = admin_session!(app);

        let req = with_cookies(test::TestRequest::post().uri("/admin/staff/new"), &cookies)
            .set_form(&[("name", "Ada Park"), ("position", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_text(resp).await;
        assert!(body.contains("Please fill in all required fields: Position"));
        assert!(body.contains("value=\"Ada Park\""));
        assert!(backend.list_staff_members().await.expect("Failed to list").is_empty());
    }

    #[actix_rt::test]
    async fn test_admin_staff_list_previews_biography() {
        let backend = backend();
        let app = app!(backend);
        let cookies = admin_session!(app);

        let req = with_cookies(test::TestRequest::post().uri("/admin/staff/new"), &cookies)
            .set_form(&[
                ("name", "Ada Park"),
                ("position", "Teacher"),
                (
                    "biography",
                    "Ada Park has taught mathematics here for over twenty years and leads the robotics club.",
                ),
            ])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

        let req = with_cookies(test::TestRequest::get().uri("/admin?tab=staff"), &cookies)
            .to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Ada Park has taught mathematics here for over twen..."));
        assert!(!body.contains("leads the robotics club"));
    }

    #[actix_rt::test]
    async fn test_admin_edits_content_block_without_changing_key() {
        let backend = backend();
        let app = app!(backend);
        let cookies = admin_session!(app);

        let req = with_cookies(test::TestRequest::post().uri("/admin/content/new"), &cookies)
            .set_form(&[("key", "home-mission"), ("title", "Mission"), ("content", "v1")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

        // Readonly key fields are still posted; a tampered key is ignored.
        let req = with_cookies(
            test::TestRequest::post().uri("/admin/content/home-mission/edit"),
            &cookies,
        )
        .set_form(&[("key", "other"), ("title", "Our Mission"), ("content", "v2")])
        .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

        let blocks = backend.get_all_content_blocks().await.expect("Failed to list");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].0, "home-mission");
        assert_eq!(blocks[0].1.title, "Our Mission");

        let req = test::TestRequest::get().uri("/").to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Our Mission"));
    }

    #[actix_rt::test]
    async fn test_admin_deletes_inquiry_after_confirm() {
        let backend = backend();
        let app = app!(backend);
        let cookies = admin_session!(app);
        let id = backend
            .submit_contact_form(&contact_draft())
            .await
            .expect("Failed to submit");

        let req = with_cookies(
            test::TestRequest::get().uri(&format!("/admin/inquiries/{}", id)),
            &cookies,
        )
        .to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("When does enrollment open?"));

        let req = with_cookies(
            test::TestRequest::get().uri(&format!("/admin/inquiries/{}/delete", id)),
            &cookies,
        )
        .to_request();
        let body = body_text(test::call_service(&app, req).await).await;
        assert!(body.contains("Are you sure you want to delete this entry?"));

        let req = with_cookies(
            test::TestRequest::post().uri(&format!("/admin/inquiries/{}/delete", id)),
            &cookies,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/admin?tab=inquiries&status=Inquiry%20deleted");
    }

    #[actix_rt::test]
    async fn test_panel_routes_redirect_without_admin() {
        let backend = backend();
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/admin/staff/new")
            .set_form(&[("name", "Ada Park"), ("position", "Principal")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/admin");
        assert!(backend.list_staff_members().await.expect("Failed to list").is_empty());
    }

    #[actix_rt::test]
    async fn test_logout_clears_session() {
        let backend = backend();
        let app = app!(backend);
        let cookies = admin_session!(app);

        let req = with_cookies(test::TestRequest::post().uri("/admin/logout"), &cookies).to_request();
        let resp = test::call_service(&app, req).await;
        let cleared = cookies_of(&resp);

        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|c| c.value().is_empty()));
    }
}
