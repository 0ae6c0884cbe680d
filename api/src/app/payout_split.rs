//! Payout split
//!
//! Each winner is paid in three tokens. The split is fixed.

use crate::domain::entities::WinnerRecord;

/// Token and fraction of the payout paid in it
pub const TOKEN_SPLIT: [(&str, f64); 3] = [("USDC", 0.6), ("DEGEN", 0.3), ("BURRITO", 0.1)];

/// Quote a field when it would break the row
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render winners as `fid,username,USDC,DEGEN,BURRITO` rows
pub fn payout_csv(winners: &[WinnerRecord]) -> String {
    let mut header = vec!["fid", "username"];
    header.extend(TOKEN_SPLIT.iter().map(|(token, _)| *token));

    let mut out = header.join(",");
    out.push('\n');

    for winner in winners {
        let mut row = vec![winner.fid.to_string(), csv_field(&winner.username)];
        row.extend(
            TOKEN_SPLIT
                .iter()
                .map(|(_, share)| format!("{:.2}", winner.payout * share)),
        );
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}
