//! Keyword heuristics for free-text log triage.
//!
//! This is not anomaly detection. Each category fires when any of its
//! keywords occurs in the lower-cased text and contributes one advisory.

use idsboard_common::RiskLevel;

struct Category {
    keywords: &'static [&'static str],
    finding: &'static str,
}

/// Risk thresholds in [`risk_for`] assume exactly these five categories.
const CATEGORIES: [Category; 5] = [
    Category {
        keywords: &["failed", "unauthorized", "denied", "forbidden"],
        finding: "Repeated authentication failures detected. Consider rate-limiting and MFA.",
    },
    Category {
        keywords: &["sql", "select", "union", " or 1=1", "-- "],
        finding: "Potential SQL injection patterns found. Ensure parameterized queries and WAF rules.",
    },
    Category {
        keywords: &["xss", "<script>", "onerror=", "alert("],
        finding: "Possible XSS attempt observed. Implement robust output encoding and CSP.",
    },
    Category {
        keywords: &["scan", "nmap", "masscan", "port"],
        finding: "Port scan behavior detected. Enable adaptive blocking and tarpits.",
    },
    Category {
        keywords: &["ssh", " 22 ", "brute"],
        finding: "SSH brute-force indicators present. Enforce key-based auth and fail2ban.",
    },
];

pub const NO_FINDINGS: &str =
    "No clear malicious patterns detected. Continue monitoring with anomaly thresholds.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub risk: RiskLevel,
    /// Never empty.
    pub findings: Vec<&'static str>,
}

pub fn analyze(text: &str) -> Analysis {
    let text = text.to_lowercase();

    let mut findings = CATEGORIES
        .iter()
        .filter(|category| category.keywords.iter().any(|k| text.contains(k)))
        .map(|category| category.finding)
        .collect::<Vec<_>>();

    if findings.is_empty() {
        findings.push(NO_FINDINGS);
    }

    Analysis {
        risk: risk_for(findings.len()),
        findings,
    }
}

fn risk_for(findings: usize) -> RiskLevel {
    match findings {
        n if n >= 3 => RiskLevel::High,
        2 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_injection_alone_is_low() {
        let analysis = analyze("select * from x where id=1 or 1=1");
        assert_eq!(analysis.findings, vec![CATEGORIES[1].finding]);
        assert_eq!(analysis.risk, RiskLevel::Low);
    }

    #[test]
    fn three_categories_are_high() {
        let analysis = analyze("unauthorized access, then nmap scan, then brute ssh");
        assert_eq!(
            analysis.findings,
            vec![
                CATEGORIES[0].finding,
                CATEGORIES[3].finding,
                CATEGORIES[4].finding,
            ]
        );
        assert_eq!(analysis.risk, RiskLevel::High);
    }

    #[test]
    fn two_categories_are_medium() {
        let analysis = analyze("Login FAILED for admin; <SCRIPT>alert(1)</script>");
        assert_eq!(
            analysis.findings,
            vec![CATEGORIES[0].finding, CATEGORIES[2].finding]
        );
        assert_eq!(analysis.risk, RiskLevel::Medium);
    }

    #[test]
    fn benign_text_falls_back() {
        let analysis = analyze("system started normally");
        assert_eq!(analysis.findings, vec![NO_FINDINGS]);
        assert_eq!(analysis.risk, RiskLevel::Low);
    }

    #[test]
    fn empty_text_falls_back() {
        assert_eq!(analyze("").findings, vec![NO_FINDINGS]);
    }

    #[test]
    fn category_counts_once_regardless_of_matches() {
        let analysis = analyze("failed failed denied forbidden unauthorized");
        assert_eq!(analysis.findings.len(), 1);
    }

    #[test]
    fn all_categories_in_fixed_order() {
        let analysis = analyze("denied union <script> masscan ssh");
        assert_eq!(
            analysis.findings,
            CATEGORIES.iter().map(|c| c.finding).collect::<Vec<_>>()
        );
        assert_eq!(analysis.risk, RiskLevel::High);
    }

    #[test]
    fn deterministic() {
        let text = "Denied connection from 10.0.0.7 port 22 ";
        assert_eq!(analyze(text), analyze(text));
    }

    #[test]
    fn padded_port_22_needs_surrounding_spaces() {
        assert!(analyze("connection on 22 refused")
            .findings
            .contains(&CATEGORIES[4].finding));
        assert_eq!(analyze("build 2022 shipped").findings, vec![NO_FINDINGS]);
    }
}
