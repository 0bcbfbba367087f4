//! Authentication routes.
//!
//! Login is the one route that returns a flat body (`{ token, user }`)
//! instead of the `{ data: ... }` envelope.

use crate::client::{ApiClient, Envelope};
use async_trait::async_trait;
use jelajah_core::gateway::{AuthGateway, AuthSession, GatewayResult, NewUser};
use jelajah_core::types::User;
use serde::Serialize;

/// Body for `POST /auth/login`
#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<AuthSession> {
        let body = LoginBody { email, password };
        self.send_json(self.post("/auth/login").json(&body)).await
    }

    async fn register(&self, user: &NewUser) -> GatewayResult<User> {
        let envelope: Envelope<User> = self
            .send_json(self.post("/auth/register").json(user))
            .await?;
        Ok(envelope.data)
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let envelope: Envelope<Vec<User>> = self.send_json(self.get("/users")).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jelajah_core::types::Role;

    #[test]
    fn login_response_is_flat() {
        let json = r#"{
            "token": "jwt-abc",
            "user": {
                "id": "u1",
                "name": "Ahmad Farhan",
                "email": "ahmad@example.com",
                "role": "wisatawan"
            }
        }"#;
        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.token, "jwt-abc");
        assert_eq!(session.user.role, Role::Traveler);
    }

    #[test]
    fn register_body_carries_the_wire_role() {
        let user = NewUser {
            name: "Siti Nuraini".to_string(),
            email: "siti@example.com".to_string(),
            password: "rahasia".to_string(),
            role: Role::Guide,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""role":"pemandu""#));
    }
}
