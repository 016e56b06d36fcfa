// Pattern grouping: clusters records whose patterns differ only in the number

use crate::limits::WIDE_PADDING_THRESHOLD;
use crate::types::{FileRecord, GroupKey, Pattern};
use std::collections::HashMap;

/// Records sharing one [`GroupKey`], in input order
#[derive(Debug, Clone)]
pub struct PatternGroup<'a> {
    pub key: GroupKey,
    pub members: Vec<&'a FileRecord>,
}

// Groups records by (prefix, title, suffix, extension). Records without a
// pattern are left out. Groups come back in first-seen order.
pub fn group(records: &[FileRecord]) -> Vec<PatternGroup<'_>> {
    let mut groups: Vec<PatternGroup<'_>> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for record in records {
        let Some(pattern) = &record.pattern else {
            continue;
        };
        let key = pattern.group_key();
        match index.get(&key).copied() {
            Some(i) => groups[i].members.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(PatternGroup {
                    key,
                    members: vec![record],
                });
            }
        }
    }

    groups
}

// First member's pattern of each group
pub fn representatives(groups: &[PatternGroup<'_>]) -> Vec<Pattern> {
    groups
        .iter()
        .filter_map(|g| g.members.first().and_then(|r| r.pattern.clone()))
        .collect()
}

/// Padding width offered for a batch of `file_count` files
pub fn padding_for_count(file_count: usize) -> usize {
    if file_count >= WIDE_PADDING_THRESHOLD {
        3
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::extract;
    use std::path::PathBuf;

    fn records(names: &[&str]) -> Vec<FileRecord> {
        names
            .iter()
            .map(|n| FileRecord::new(PathBuf::from(n)).with_pattern(extract(n)))
            .collect()
    }

    #[test]
    fn same_series_shares_a_group() {
        let recs = records(&["[G] A 01.zip", "[G] A 02.zip"]);
        let groups = group(&recs);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].key,
            GroupKey {
                prefix: "[G]".to_string(),
                title: "A".to_string(),
                suffix: String::new(),
                extension: "zip".to_string(),
            }
        );
        assert_eq!(groups[0].members.len(), 2);

        let reps = representatives(&groups);
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].number, "01");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let recs = records(&["Zeta 1.zip", "Alpha 1.zip", "Zeta 2.zip", "Alpha 2.cbz"]);
        let groups = group(&recs);
        let titles: Vec<&str> = groups.iter().map(|g| g.key.title.as_str()).collect();
        assert_eq!(titles, ["Zeta", "Alpha", "Alpha"]);
        assert_eq!(groups[2].key.extension, "cbz");
    }

    #[test]
    fn records_without_pattern_are_skipped() {
        let mut recs = records(&["A 1.zip"]);
        recs.push(FileRecord::new(PathBuf::from("loose.bin")));
        let groups = group(&recs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 1);
    }

    #[test]
    fn padding_widens_for_large_batches() {
        assert_eq!(padding_for_count(0), 2);
        assert_eq!(padding_for_count(99), 2);
        assert_eq!(padding_for_count(100), 3);
    }
}
