use anyhow::Context;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    user: Option<Uuid>,
    name: String,
    guest: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let (sub, token) = issue(config, user, name, guest)?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Token issued",
            Some(json!({ "user": sub, "guest": guest, "token": token })),
        ),
        // Bare token so it can be captured with $(lists token)
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}

fn issue(config: &AppConfig, user: Option<Uuid>, name: String, guest: bool) -> anyhow::Result<(Uuid, String)> {
    let sub = user.unwrap_or_else(Uuid::new_v4);
    let claims = Claims::new(sub, name, guest, config.security.jwt_expiry_hours);
    let token = generate_jwt(&config.security, &claims).context("SECURITY_JWT_SECRET must be set to issue tokens")?;
    Ok((sub, token))
}
