//! Roster CSV parsing for bulk import, plus the downloadable template.
//!
//! Column layout: name, phone, baptismal name, district. A header row
//! (detected by "이름" / "전화" in the first two cells) is skipped and not
//! counted. Rows with missing required cells are kept so the import can
//! account for them as skipped.

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub name: String,
    pub phone: String,
    pub baptismal_name: String,
    pub district: String,
}

/// Parses CSV text into roster rows. Blank lines are dropped; everything else
/// becomes a row, valid or not.
pub fn parse(text: &str) -> Vec<RosterRow> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(line);
        let cell = |idx: usize| fields.get(idx).map(|s| s.trim()).unwrap_or("").to_string();

        let name = cell(0);
        let phone = cell(1);
        if i == 0 && (name.contains("이름") || phone.contains("전화")) {
            continue;
        }
        rows.push(RosterRow {
            name,
            phone,
            baptismal_name: cell(2),
            district: cell(3),
        });
    }
    rows
}

/// CSV template offered for download, mirroring the expected column layout.
pub fn template() -> String {
    let mut csv = String::from("이름,전화번호,세례명,구역\n");
    csv.push_str("홍길동,010-1234-5678,베드로,1구역\n");
    csv.push_str("김철수,010-2345-6789,요한,2구역\n");
    csv.push_str("박영희,010-3456-7890,마리아,1구역\n");
    csv
}

// Minimal CSV field splitting: commas separate fields, double quotes wrap
// fields containing commas, "" inside quotes is a literal quote.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_header() {
        let text = "이름,전화번호,세례명,구역\n홍길동,010-1234-5678,베드로,1구역\n김철수,01023456789,,\n";
        let rows = parse(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "홍길동");
        assert_eq!(rows[0].district, "1구역");
        assert_eq!(rows[1].baptismal_name, "");
    }

    #[test]
    fn keeps_invalid_rows_for_skip_accounting() {
        let text = "홍길동,010-1234-5678\n,01000000000\n박영희,\n";
        let rows = parse(text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].name, "");
        assert_eq!(rows[2].phone, "");
    }

    #[test]
    fn handles_quoted_fields() {
        let rows = parse("\"홍, 길동\",010-1234-5678,\"베\"\"드로\",1구역\n");
        assert_eq!(rows[0].name, "홍, 길동");
        assert_eq!(rows[0].baptismal_name, "베\"드로");
    }

    #[test]
    fn missing_trailing_cells_default_to_empty() {
        let rows = parse("홍길동,010-1234-5678\n");
        assert_eq!(rows[0].baptismal_name, "");
        assert_eq!(rows[0].district, "");
    }

    #[test]
    fn template_round_trips_through_parse() {
        let rows = parse(&template());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| !r.name.is_empty() && !r.phone.is_empty()));
    }
}
