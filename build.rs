use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

const SECRETS_FILE: &str = "secrets.toml";
const PROFILE_FEATURE_PREFIX: &str = "CARGO_FEATURE_KOELKAST_";

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSecrets {
    wifi_ssid: Option<String>,
    wifi_password: Option<String>,
    telemetry_secret: Option<String>,
    telemetry_endpoint: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if the secrets change
    println!("cargo:rerun-if-changed={}", SECRETS_FILE);
    println!("cargo:rerun-if-changed=build.rs");

    let firmware = env::var_os("CARGO_FEATURE_EMBEDDED").is_some();

    // Exactly one device profile feature must be enabled
    let mut selected: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix(PROFILE_FEATURE_PREFIX)
                .map(|id| format!("koelkast-{}", id.to_ascii_lowercase()))
        })
        .collect();
    selected.sort();

    match selected.len() {
        1 => {}
        0 if firmware => {
            return Err("no device profile selected: enable exactly one of the \
                        `koelkast-a`..`koelkast-d` features"
                .into())
        }
        0 => println!("cargo:warning=no device profile feature enabled"),
        _ => {
            return Err(format!(
                "multiple device profiles selected ({}): enable exactly one",
                selected.join(", ")
            )
            .into())
        }
    }

    // Secrets live in an untracked file, missing is only fatal for firmware builds
    let raw: RawSecrets = match fs::read_to_string(SECRETS_FILE) {
        Ok(toml_str) => toml::from_str(&toml_str)?,
        Err(_) if firmware => {
            return Err(format!(
                "{} not found, copy {}.example and fill in your credentials",
                SECRETS_FILE, SECRETS_FILE
            )
            .into())
        }
        Err(_) => {
            println!("cargo:warning={} not found, building without secrets", SECRETS_FILE);
            RawSecrets::default()
        }
    };

    if firmware && raw.wifi_ssid.as_deref().map_or(true, str::is_empty) {
        return Err(format!("wifi_ssid not defined in {}", SECRETS_FILE).into());
    }

    // Generate Rust code
    let code = format!(
        r#"
        pub const BUILD_SECRETS: Secrets = Secrets {{
            wifi_ssid: {ssid:?},
            wifi_password: {psk:?},
            telemetry_secret: {secret:?},
            telemetry_endpoint: {endpoint:?},
        }};
    "#,
        ssid = raw.wifi_ssid,
        psk = raw.wifi_password,
        secret = raw.telemetry_secret,
        endpoint = raw.telemetry_endpoint,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("secrets.rs");
    fs::write(dest_path, code)?;

    Ok(())
}
