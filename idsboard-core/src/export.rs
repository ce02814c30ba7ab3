use idsboard_common::Alert;

/// Renders alerts as comma-separated text with a header row.
///
/// Commas inside values are replaced by spaces rather than quoted, so the
/// output is only as strict as the dashboard's CSV viewer needs.
pub fn to_csv(alerts: &[Alert]) -> String {
    let mut rows = Vec::with_capacity(alerts.len() + 1);
    rows.push(Alert::COLUMNS.join(","));
    for alert in alerts {
        rows.push(
            alert
                .values()
                .iter()
                .map(|value| value.replace(',', " "))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, src: &str) -> Alert {
        Alert {
            alert_id: id.into(),
            time: "2024-05-01T10:00:00Z".into(),
            src: src.into(),
            dest: "10.0.0.9:443".into(),
            kind: "port-scan".into(),
            severity: "High".into(),
        }
    }

    #[test]
    fn empty_input_is_header_only() {
        assert_eq!(to_csv(&[]), "alert_id,time,src,dest,type,severity");
    }

    #[test]
    fn one_row_per_alert_without_trailing_newline() {
        let csv = to_csv(&[alert("a1", "10.0.0.1"), alert("a2", "10.0.0.2")]);
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "alert_id,time,src,dest,type,severity");
        assert_eq!(
            lines[2],
            "a2,2024-05-01T10:00:00Z,10.0.0.2,10.0.0.9:443,port-scan,High"
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn commas_become_spaces() {
        let csv = to_csv(&[alert("a,1", "10.0.0.1,x")]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), 6);
        assert!(row.starts_with("a 1,"));
        assert!(row.contains(",10.0.0.1 x,"));
    }
}
