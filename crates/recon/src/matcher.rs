use crate::model::{Evidence, Record};
use crate::normalize::normalize;

/// All evidence between a left and a right record: name rules, then alias
/// rules, then identifier rules. Not deduplicated.
pub fn find_matches(left: &Record, right: &Record) -> Vec<Evidence> {
    let mut matches = name_matches(left, right);
    matches.extend(alias_matches(left, right));
    matches.extend(id_matches(left, right));
    matches
}

/// Left name against the right name and every right alias.
pub fn name_matches(left: &Record, right: &Record) -> Vec<Evidence> {
    let mut matches = Vec::new();
    let left_name = normalize(&left.name);

    if left_name == normalize(&right.name) {
        matches.push(Evidence::NameToName {
            left_name: left.name.clone(),
            right_name: right.name.clone(),
        });
    }

    for alias in right.aliases.iter() {
        let Some(value) = alias.value.as_deref() else { continue };
        if left_name == normalize(value) {
            matches.push(Evidence::NameToAlias {
                left_name: left.name.clone(),
                right_alias: value.to_string(),
            });
        }
    }

    matches
}

/// Every left alias against the right name and every right alias.
pub fn alias_matches(left: &Record, right: &Record) -> Vec<Evidence> {
    let mut matches = Vec::new();
    let right_name = normalize(&right.name);
    let right_aliases: Vec<(&str, String)> = right
        .aliases
        .iter()
        .filter_map(|a| a.value.as_deref())
        .map(|v| (v, normalize(v)))
        .collect();

    for left_alias in left.aliases.iter() {
        let Some(value) = left_alias.value.as_deref() else { continue };
        let normalized = normalize(value);

        if normalized == right_name {
            matches.push(Evidence::AliasToName {
                left_alias: value.to_string(),
                right_name: right.name.clone(),
            });
        }

        for (right_value, right_normalized) in &right_aliases {
            if normalized == *right_normalized {
                matches.push(Evidence::AliasToAlias {
                    left_alias: value.to_string(),
                    right_alias: right_value.to_string(),
                });
            }
        }
    }

    matches
}

/// Exact (unnormalized) identifier equality across both id lists. Two absent
/// values are equal.
pub fn id_matches(left: &Record, right: &Record) -> Vec<Evidence> {
    let mut matches = Vec::new();

    for left_id in left.id_numbers.iter() {
        for right_id in right.id_numbers.iter() {
            if left_id.value == right_id.value {
                matches.push(Evidence::IdentifierMatch {
                    left_value: left_id.value.clone(),
                    left_comment: left_id.comment.clone(),
                    right_value: right_id.value.clone(),
                    right_comment: right_id.comment.clone(),
                });
            }
        }
    }

    matches
}
