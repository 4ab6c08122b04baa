//! Stable listing sorter.

use std::cmp::Ordering;

use store_host::{parse_rfc3339_ms, StoreEntry};

use crate::model::{SortColumn, SortOrder, SortPreference};

/// Orders a listing in place: directories always precede files, then the
/// preferred column decides, with the direction applied to the column key
/// only. The sort is stable, so equal keys keep their backend order.
pub fn sort_entries(entries: &mut [StoreEntry], pref: SortPreference) {
    entries.sort_by(|a, b| {
        // Directory-first is the fixed primary key and never reverses.
        let primary = b.is_dir.cmp(&a.is_dir);
        if primary != Ordering::Equal {
            return primary;
        }
        let secondary = match pref.column {
            SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortColumn::Size => a.size.cmp(&b.size),
            SortColumn::Modtime => modtime_ms(a).cmp(&modtime_ms(b)),
        };
        match pref.order {
            SortOrder::Asc => secondary,
            SortOrder::Desc => secondary.reverse(),
        }
    });
}

/// Modification instant for ordering; unset or unparsable times sort as
/// the epoch, i.e. earliest.
fn modtime_ms(entry: &StoreEntry) -> i64 {
    parse_rfc3339_ms(&entry.modtime).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(name: &str, is_dir: bool, size: u64, modtime: &str) -> StoreEntry {
        StoreEntry {
            name: name.to_string(),
            is_dir,
            size,
            modtime: modtime.to_string(),
            expires_at: None,
            tags: Vec::new(),
            stream: None,
            group: None,
            keep_latest: false,
            policy: store_host::AccessPolicy::unrestricted(),
            download_mode: store_host::DownloadMode::Literal,
        }
    }

    fn names(entries: &[StoreEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn directories_precede_files_for_every_column_and_order() {
        for column in [SortColumn::Name, SortColumn::Size, SortColumn::Modtime] {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let mut entries = vec![
                    entry("zz.txt", false, 1, "2026-01-02T00:00:00Z"),
                    entry("aa", true, 0, "2026-01-01T00:00:00Z"),
                    entry("mm.txt", false, 2, "2026-01-03T00:00:00Z"),
                    entry("bb", true, 0, "2026-01-04T00:00:00Z"),
                ];
                sort_entries(&mut entries, SortPreference { column, order });
                assert!(
                    entries[0].is_dir && entries[1].is_dir,
                    "column={column:?} order={order:?} got {:?}",
                    names(&entries)
                );
            }
        }
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let mut entries = vec![
            entry("delta.txt", false, 0, ""),
            entry("Alpha.txt", false, 0, ""),
            entry("charlie.txt", false, 0, ""),
            entry("Bravo.txt", false, 0, ""),
        ];
        sort_entries(&mut entries, SortPreference::default());
        assert_eq!(
            names(&entries),
            vec!["Alpha.txt", "Bravo.txt", "charlie.txt", "delta.txt"]
        );
    }

    #[test]
    fn size_ties_preserve_backend_order() {
        let mut entries = vec![
            entry("second.bin", false, 5_000, ""),
            entry("first.bin", false, 5_000, ""),
            entry("small.bin", false, 10, ""),
        ];
        sort_entries(
            &mut entries,
            SortPreference {
                column: SortColumn::Size,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&entries), vec!["small.bin", "second.bin", "first.bin"]);

        // Descending reverses the key comparison, not the tie order.
        let mut entries = vec![
            entry("second.bin", false, 5_000, ""),
            entry("first.bin", false, 5_000, ""),
            entry("small.bin", false, 10, ""),
        ];
        sort_entries(
            &mut entries,
            SortPreference {
                column: SortColumn::Size,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(names(&entries), vec!["second.bin", "first.bin", "small.bin"]);
    }

    #[test]
    fn unset_modtimes_sort_earliest() {
        let mut entries = vec![
            entry("new.txt", false, 0, "2026-02-01T00:00:00Z"),
            entry("zero.txt", false, 0, "0001-01-01T00:00:00Z"),
            entry("broken.txt", false, 0, "not-a-date"),
            entry("old.txt", false, 0, "2020-01-01T00:00:00Z"),
        ];
        sort_entries(
            &mut entries,
            SortPreference {
                column: SortColumn::Modtime,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(
            names(&entries),
            vec!["zero.txt", "broken.txt", "old.txt", "new.txt"]
        );
    }

    #[test]
    fn mixed_listing_sorts_by_size_ascending_and_name_descending() {
        // 3 files (a.txt 10, B.txt 5000, c.txt 5000) and directory `sub`.
        let seed = || {
            vec![
                entry("a.txt", false, 10, ""),
                entry("B.txt", false, 5_000, ""),
                entry("c.txt", false, 5_000, ""),
                entry("sub", true, 0, ""),
            ]
        };

        let mut entries = seed();
        sort_entries(
            &mut entries,
            SortPreference {
                column: SortColumn::Size,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(names(&entries), vec!["sub", "a.txt", "B.txt", "c.txt"]);

        let mut entries = seed();
        sort_entries(
            &mut entries,
            SortPreference {
                column: SortColumn::Name,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(names(&entries), vec!["sub", "c.txt", "B.txt", "a.txt"]);
    }
}
