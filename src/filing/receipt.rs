use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::simulator::ReturnKind;

/// Acknowledgment issued at the end of a successful (simulated) filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// Acknowledgment reference number, e.g. `ARN-GSTR1-20240415103000123`.
    pub id: String,
    pub return_kind: ReturnKind,
    pub filed_at: DateTime<Utc>,
}

impl Acknowledgment {
    pub(crate) fn issue(prefix: &str, return_kind: ReturnKind, filed_at: DateTime<Utc>) -> Self {
        Self {
            id: format!(
                "{prefix}-{}-{}",
                return_kind.code(),
                filed_at.format("%Y%m%d%H%M%S%3f")
            ),
            return_kind,
            filed_at,
        }
    }

    /// Plain-text receipt for download.
    pub fn receipt(&self) -> String {
        let mut out = String::new();
        out.push_str("GST Return Filing Acknowledgment\n");
        out.push_str("================================\n");
        out.push_str(&format!("Return:             {}\n", self.return_kind.label()));
        out.push_str(&format!("Acknowledgment No.: {}\n", self.id));
        out.push_str(&format!(
            "Filed at:           {}\n",
            self.filed_at.format("%d-%m-%Y %H:%M:%S UTC")
        ));
        out.push_str("Status:             Filed successfully\n\n");
        out.push_str("Generated by a simulated submission. Not issued by the GST portal.\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 15, 10, 30, 0).unwrap()
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn id_format() {
        let ack = Acknowledgment::issue("ARN", ReturnKind::Gstr3b, filed_at());
        assert_eq!(ack.id, "ARN-GSTR3B-20240415103000123");
    }

    #[test]
    fn receipt_mentions_id_and_return() {
        let ack = Acknowledgment::issue("ARN", ReturnKind::Gstr1, filed_at());
        let text = ack.receipt();
        assert!(text.contains("ARN-GSTR1-20240415103000123"));
        assert!(text.contains("Return:             GSTR-1"));
        assert!(text.contains("15-04-2024 10:30:00 UTC"));
    }
}
