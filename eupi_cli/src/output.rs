use anyhow::Result;
use eupi_api::ApiResponse;

/// Renders the flattened response as one JSON document.
pub fn render_json(response: &ApiResponse, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    Ok(json)
}

pub fn print_json(response: &ApiResponse, pretty: bool) -> Result<()> {
    println!("{}", render_json(response, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use eupi_api::Envelope;

    use super::*;

    #[test]
    fn compact_output_is_a_single_line() {
        let response = ApiResponse {
            envelope: Envelope::from_body(r#"[{"url": "http://évil.example"}]"#, false),
            debug: None,
        };
        let json = render_json(&response, false).unwrap();
        assert_eq!(json.lines().count(), 1);
        assert!(json.contains("évil"));
        assert!(json.contains("\"count\":1"));
    }

    #[test]
    fn error_envelope_still_renders() {
        let response = ApiResponse {
            envelope: Envelope::from_body("<html>", false),
            debug: None,
        };
        let value: serde_json::Value =
            serde_json::from_str(&render_json(&response, true).unwrap()).unwrap();
        assert_eq!(value["status"], 400);
    }
}
