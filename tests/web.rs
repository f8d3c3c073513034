#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use staffdesk::db::db::Db;
    use staffdesk::db::departments::Departments;
    use staffdesk::db::employees::{Assignment, Employees};
    use staffdesk::db::positions::Positions;
    use staffdesk::libs::config::Config;
    use staffdesk::libs::staff::{add_employee, update_employee, AddEmployeeOutcome};
    use staffdesk::web::{router, AppState};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tower::ServiceExt;

    struct WebTestContext {
        app: Router,
        database: PathBuf,
        _temp_dir: TempDir,
    }

    impl AsyncTestContext for WebTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let database = temp_dir.path().join("staffdesk.db");
            Db::init(&database).unwrap();

            let config = Config {
                database: database.clone(),
                secret_key: "test-secret".to_string(),
                bind: "127.0.0.1:0".to_string(),
                session_minutes: 60,
                password_cost: 4,
            };
            let app = router(AppState::new(config).unwrap());

            WebTestContext {
                app,
                database,
                _temp_dir: temp_dir,
            }
        }
    }

    impl WebTestContext {
        async fn send(&self, request: Request<Body>) -> Response {
            self.app.clone().oneshot(request).await.unwrap()
        }

        async fn get(&self, uri: &str, session: Option<&str>) -> Response {
            let mut request = Request::get(uri);
            if let Some(session) = session {
                request = request.header(COOKIE, session);
            }
            self.send(request.body(Body::empty()).unwrap()).await
        }

        async fn post(&self, uri: &str, form: &str, session: Option<&str>) -> Response {
            let mut request = Request::post(uri).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            if let Some(session) = session {
                request = request.header(COOKIE, session);
            }
            self.send(request.body(Body::from(form.to_string())).unwrap()).await
        }

        /// Registers and logs in, returning the `Cookie` header value.
        async fn login_as(&self, username: &str, password: &str) -> String {
            let response = self
                .post("/register", &format!("username={0}&password={1}&password2={1}", username, password), None)
                .await;
            assert_eq!(location(&response), Some("/login"));

            let response = self.post("/login", &format!("username={}&password={}", username, password), None).await;
            assert_eq!(location(&response), Some("/index"));
            session_cookie(&response).expect("login sets the session cookie")
        }

        fn db(&self) -> Db {
            Db::open(&self.database).unwrap()
        }
    }

    fn location(response: &Response) -> Option<&str> {
        response.headers().get(LOCATION).and_then(|value| value.to_str().ok())
    }

    fn session_cookie(response: &Response) -> Option<String> {
        let value = response.headers().get(SET_COOKIE)?.to_str().ok()?;
        value.split(';').next().map(str::to_string)
    }

    async fn body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_protected_pages_redirect_to_login(ctx: &mut WebTestContext) {
        for uri in ["/index", "/positions", "/employees", "/department/stats", "/employee/add"] {
            let response = ctx.get(uri, None).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
            assert_eq!(location(&response), Some("/login"), "{}", uri);
        }
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_forged_session_is_rejected(ctx: &mut WebTestContext) {
        let response = ctx.get("/positions", Some("session=not.a.token")).await;
        assert_eq!(location(&response), Some("/login"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_root_redirects_to_index(ctx: &mut WebTestContext) {
        let response = ctx.get("/", None).await;
        assert_eq!(location(&response), Some("/index"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_register_then_login(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;

        let response = ctx.get("/index", Some(&session)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Hi, admin!"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_duplicate_username_is_refused(ctx: &mut WebTestContext) {
        ctx.login_as("admin", "admin").await;

        let response = ctx.post("/register", "username=admin&password=x&password2=x", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Please use a different username"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_mismatched_passwords_are_refused(ctx: &mut WebTestContext) {
        let response = ctx.post("/register", "username=admin&password=one&password2=two", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Field must be equal to password."));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_wrong_password(ctx: &mut WebTestContext) {
        ctx.login_as("admin", "admin").await;

        let response = ctx.post("/login", "username=admin&password=wrong", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());
        assert!(body(response).await.contains("Incorrect password."));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_unknown_user(ctx: &mut WebTestContext) {
        let response = ctx.post("/login", "username=ghost&password=boo", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("User does not match"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_logout_expires_the_session_cookie(ctx: &mut WebTestContext) {
        let response = ctx.get("/logout", None).await;
        assert_eq!(location(&response), Some("/login"));
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_add_and_delete_position(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;

        let response = ctx.post("/position/add", "position_name=pos_test1234&description=pos_test", Some(&session)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Position added successfully"));

        let positions = Positions::new(&ctx.db()).list().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].position_name, "pos_test1234");
        assert_eq!(positions[0].description, "pos_test");

        let listing = body(ctx.get("/positions", Some(&session)).await).await;
        assert!(listing.contains("pos_test1234"));

        let response = ctx.post(&format!("/position/delete/{}", positions[0].id), "", Some(&session)).await;
        assert_eq!(location(&response), Some("/positions"));
        assert!(Positions::new(&ctx.db()).list().unwrap().is_empty());
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_blank_position_is_not_saved(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;

        let response = ctx.post("/position/add", "position_name=&description=x", Some(&session)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("This field is required."));
        assert!(Positions::new(&ctx.db()).list().unwrap().is_empty());
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_new_department_is_offered_as_parent(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;

        let response = ctx.post("/department/add", "department_name=Head+office&parent_id=0", Some(&session)).await;
        let page = body(response).await;
        assert!(page.contains("Department added successfully"));
        assert!(page.contains("Haven't parent") || page.contains("Haven&#x27;t parent"));
        assert!(page.contains(">Head office</option>"));

        let hq = Departments::new(&ctx.db()).list().unwrap()[0].id;
        let response = ctx.post("/department/add", &format!("department_name=Lab&parent_id={}", hq), Some(&session)).await;
        assert!(body(response).await.contains("Department added successfully"));

        let stats = body(ctx.get("/department/stats", Some(&session)).await).await;
        assert!(stats.contains("Head office"));
        assert!(stats.contains("Lab"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_employee_lifecycle(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;
        let (position, first, second) = {
            let db = ctx.db();
            let position = Positions::new(&db).insert("Engineer", "dev").unwrap();
            let departments = Departments::new(&db);
            (position, departments.insert("First", None).unwrap(), departments.insert("Second", None).unwrap())
        };

        let form = format!("fio=Ivanov+I.I.&position_id={}&department_id={}", position, first);
        let response = ctx.post("/employee/add", &form, Some(&session)).await;
        assert!(body(response).await.contains("Employee added successfully"));

        let response = ctx.post("/employee/add", &form, Some(&session)).await;
        assert!(body(response).await.contains("Please enter a different fio"));

        let response = ctx
            .post("/employee/update/1", &format!("position_id={}&department_id={}", position, second), Some(&session))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Employee updated successfully"));

        let listing = body(ctx.get("/employees", Some(&session)).await).await;
        assert!(listing.contains("Ivanov I.I."));
        assert!(listing.contains("Second"));

        let response = ctx.post("/employee/delete/1", "", Some(&session)).await;
        assert_eq!(location(&response), Some("/employees"));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_update_unknown_employee_is_not_found(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;

        let response = ctx.get("/employee/update/999", Some(&session)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ctx.post("/employee/update/999", "position_id=1&department_id=1", Some(&session)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_delete_parent_department_keeps_children(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;
        let (parent, child) = {
            let db = ctx.db();
            let departments = Departments::new(&db);
            let parent = departments.insert("Parent", None).unwrap();
            (parent, departments.insert("Child", Some(parent)).unwrap())
        };

        let response = ctx.post(&format!("/department/delete/{}", parent), "", Some(&session)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/index"));

        let remaining = Departments::new(&ctx.db()).list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!((remaining[0].id, remaining[0].parent_id), (child, Some(parent)));
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_delete_position_held_by_an_employee(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;
        let position = {
            let db = ctx.db();
            let position = Positions::new(&db).insert("Engineer", "dev").unwrap();
            let department = Departments::new(&db).insert("R&D", None).unwrap();
            add_employee(&db, "Ivanov", position, department, chrono::Utc::now().date_naive()).unwrap();
            position
        };

        let response = ctx.get(&format!("/position/delete/{}", position), Some(&session)).await;
        assert_eq!(location(&response), Some("/positions"));
        assert!(Positions::new(&ctx.db()).list().unwrap().is_empty());
    }

    #[test_context(WebTestContext)]
    #[tokio::test]
    async fn test_delete_employee_with_change_counter(ctx: &mut WebTestContext) {
        let session = ctx.login_as("admin", "admin").await;
        let employee = {
            let db = ctx.db();
            let position = Positions::new(&db).insert("Engineer", "dev").unwrap();
            let departments = Departments::new(&db);
            let first = departments.insert("First", None).unwrap();
            let second = departments.insert("Second", None).unwrap();
            let AddEmployeeOutcome::Added(id) = add_employee(&db, "Petrov", position, first, chrono::Utc::now().date_naive()).unwrap() else {
                panic!("employee not added");
            };
            update_employee(&db, id, Assignment { department_id: second, position_id: position }).unwrap().unwrap();
            id
        };

        let response = ctx.post(&format!("/employee/delete/{}", employee), "", Some(&session)).await;
        assert_eq!(location(&response), Some("/employees"));
        assert!(Employees::new(&ctx.db()).get(employee).unwrap().is_none());
    }
}
