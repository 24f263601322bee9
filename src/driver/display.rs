use super::dto::DataResult;
use crate::execution::{decode_u128, encoding::U128_WIDTH};

/// Key/value rows for a tallied result, in display order.
pub fn result_rows(result: &DataResult) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("drId", result.dr_id.to_string()),
        ("exitCode", result.exit_code.to_string()),
        ("result", format_result(result)),
        ("blockHeight", result.block_height.to_string()),
        ("gasUsed", result.gas_used.clone()),
        ("consensus", result.consensus.to_string()),
    ];
    if let Some(address) = &result.payback_address {
        rows.push(("paybackAddress", address.clone()));
    }
    rows
}

fn format_result(result: &DataResult) -> String {
    let hex = hex::encode(&result.result);
    if result.exit_code != 0 {
        return format!("{} ({})", hex, String::from_utf8_lossy(&result.result));
    }
    if result.result.len() == U128_WIDTH {
        if let Ok(value) = decode_u128(&result.result) {
            return format!("{} ({})", hex, value);
        }
    }
    hex
}

pub fn render_table(result: &DataResult) -> String {
    let rows = result_rows(result);
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let border = format!("+-{}-+-{}-+", "-".repeat(key_width), "-".repeat(value_width));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for (key, value) in rows {
        out.push_str(&format!(
            "| {:<kw$} | {:<vw$} |\n",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    out.push_str(&border);
    out
}
