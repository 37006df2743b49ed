//! District-level attendance aggregation.
//!
//! A pure function of `(roster, attended-id set)`: no queries, no hidden
//! state, so re-aggregating after a session-filter change is deterministic.
//! Hangul syllables sort in dictionary order under code-point comparison,
//! which is the collation the roster names use.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use db::models::{attendance_record, participant};
use serde::Serialize;

/// Reserved bucket for members without a district. Always sorts last,
/// wherever its label would fall lexically.
pub const UNASSIGNED_DISTRICT: &str = "미배정";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictMember {
    pub id: i64,
    pub name: String,
    pub baptismal_name: String,
    pub attended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictGroup {
    pub district: String,
    pub total: i64,
    pub attended: i64,
    pub percent: i64,
    pub members: Vec<DistrictMember>,
}

/// Collects the participant ids present in the record set, optionally scoped
/// to one session.
pub fn attended_ids(
    records: &[attendance_record::Model],
    session_id: Option<&str>,
) -> HashSet<i64> {
    records
        .iter()
        .filter(|r| session_id.is_none_or(|sid| r.session_id == sid))
        .map(|r| r.participant_id)
        .collect()
}

/// Groups the roster by district and annotates each member with attendance.
///
/// Districts sort by name ascending with [`UNASSIGNED_DISTRICT`] last; within
/// a district members sort attended-first, then by name. Both sorts are
/// stable, so equal keys keep roster order.
pub fn aggregate_by_district(
    roster: &[participant::Model],
    attended: &HashSet<i64>,
) -> Vec<DistrictGroup> {
    let mut groups: HashMap<String, DistrictGroup> = HashMap::new();

    for p in roster {
        let district = match p.district.trim() {
            "" => UNASSIGNED_DISTRICT.to_string(),
            d => d.to_string(),
        };
        let has_attended = attended.contains(&p.id);
        let group = groups
            .entry(district.clone())
            .or_insert_with(|| DistrictGroup {
                district,
                total: 0,
                attended: 0,
                percent: 0,
                members: Vec::new(),
            });
        group.total += 1;
        if has_attended {
            group.attended += 1;
        }
        group.members.push(DistrictMember {
            id: p.id,
            name: p.name.clone(),
            baptismal_name: p.baptismal_name.clone(),
            attended: has_attended,
        });
    }

    let mut groups: Vec<DistrictGroup> = groups.into_values().collect();
    for group in &mut groups {
        group.percent = attendance_percent(group.attended, group.total);
        group
            .members
            .sort_by(|a, b| match b.attended.cmp(&a.attended) {
                Ordering::Equal => name_cmp(&a.name, &b.name),
                other => other,
            });
    }
    groups.sort_by(|a, b| district_cmp(&a.district, &b.district));
    groups
}

/// Rounded attendance percentage. A zero total cannot occur for a group that
/// exists, but fail closed to 0 instead of dividing anyway.
pub fn attendance_percent(attended: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((attended as f64 / total as f64) * 100.0).round() as i64
}

fn district_cmp(a: &str, b: &str) -> Ordering {
    match (a == UNASSIGNED_DISTRICT, b == UNASSIGNED_DISTRICT) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => name_cmp(a, b),
    }
}

fn name_cmp(a: &str, b: &str) -> Ordering {
    a.chars().cmp(b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(id: i64, name: &str, district: &str) -> participant::Model {
        participant::Model {
            id,
            name: name.to_string(),
            phone: "01012345678".to_string(),
            phone_hash: String::new(),
            phone_last4: "5678".to_string(),
            baptismal_name: String::new(),
            district: district.to_string(),
            created_at: Utc::now(),
        }
    }

    fn record(id: i64, session_id: &str, participant_id: i64) -> attendance_record::Model {
        attendance_record::Model {
            id,
            session_id: session_id.to_string(),
            session_title: String::new(),
            participant_id,
            name: String::new(),
            phone: String::new(),
            phone_last4: String::new(),
            checked_in_at: "2024-01-07 09:30".to_string(),
            ip: None,
            user_agent: None,
        }
    }

    #[test]
    fn counts_and_percentages_per_district() {
        // district A: 3 members, 2 attended; district B: 7 members, 0 attended
        let mut roster: Vec<_> = (1..=3).map(|i| member(i, &format!("가{i}"), "A")).collect();
        roster.extend((4..=10).map(|i| member(i, &format!("나{i}"), "B")));
        let attended: HashSet<i64> = [1, 2].into();

        let groups = aggregate_by_district(&roster, &attended);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].district, "A");
        assert_eq!((groups[0].total, groups[0].attended), (3, 2));
        assert_eq!(groups[0].percent, 67);
        assert_eq!(groups[1].district, "B");
        assert_eq!((groups[1].total, groups[1].attended), (7, 0));
        assert_eq!(groups[1].percent, 0);

        let total_attended: i64 = groups.iter().map(|g| g.attended).sum();
        assert_eq!(total_attended, 2);
    }

    #[test]
    fn attended_never_exceeds_total_even_for_unknown_ids() {
        let roster = vec![member(1, "홍길동", "1구역")];
        // id 99 checked in but is no longer on the roster
        let attended: HashSet<i64> = [1, 99].into();

        let groups = aggregate_by_district(&roster, &attended);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].attended <= groups[0].total);
        assert_eq!(groups[0].attended, 1);
    }

    #[test]
    fn unassigned_bucket_sorts_last() {
        let roster = vec![
            member(1, "가", ""),
            member(2, "나", "하늘구역"), // lexically after 미배정
            member(3, "다", "1구역"),
        ];
        let groups = aggregate_by_district(&roster, &HashSet::new());
        let names: Vec<&str> = groups.iter().map(|g| g.district.as_str()).collect();
        assert_eq!(names, vec!["1구역", "하늘구역", UNASSIGNED_DISTRICT]);
    }

    #[test]
    fn members_sort_attended_first_then_by_name() {
        let roster = vec![
            member(1, "다인", "A"),
            member(2, "가은", "A"),
            member(3, "나리", "A"),
        ];
        let attended: HashSet<i64> = [3].into();

        let groups = aggregate_by_district(&roster, &attended);
        let order: Vec<(&str, bool)> = groups[0]
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.attended))
            .collect();
        assert_eq!(
            order,
            vec![("나리", true), ("가은", false), ("다인", false)]
        );
    }

    #[test]
    fn aggregation_is_deterministic() {
        let roster = vec![
            member(1, "홍길동", "1구역"),
            member(2, "김철수", ""),
            member(3, "박영희", "2구역"),
        ];
        let attended: HashSet<i64> = [1, 3].into();

        let first = aggregate_by_district(&roster, &attended);
        let second = aggregate_by_district(&roster, &attended);
        assert_eq!(first, second);
    }

    #[test]
    fn attended_ids_scopes_to_one_session() {
        let records = vec![
            record(1, "a", 1),
            record(2, "a", 2),
            record(3, "b", 3),
        ];
        assert_eq!(attended_ids(&records, None), [1, 2, 3].into());
        assert_eq!(attended_ids(&records, Some("a")), [1, 2].into());
        assert_eq!(attended_ids(&records, Some("missing")), HashSet::new());
    }

    #[test]
    fn percent_fails_closed_on_zero_total() {
        assert_eq!(attendance_percent(0, 0), 0);
        assert_eq!(attendance_percent(1, 3), 33);
        assert_eq!(attendance_percent(2, 3), 67);
        assert_eq!(attendance_percent(3, 3), 100);
    }
}
