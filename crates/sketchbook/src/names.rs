use chrono::{Local, NaiveDateTime};

use crate::validate::{
    is_cloud_char, is_first_char, is_sketch_char, validate_sketch_folder_name,
    MAX_CLOUD_SKETCH_FOLDER_NAME_LEN, MAX_SKETCH_FOLDER_NAME_LEN,
};

pub const DEFAULT_SKETCH_FOLDER_NAME: &str = "sketch";
pub const DEFAULT_CLOUD_SKETCH_FOLDER_NAME: &str = "sketch";
pub const DEFAULT_FALLBACK_FIRST_CHAR: char = '0';
pub const DEFAULT_FALLBACK_CHAR: char = '_';

const TIMESTAMP_SUFFIX_PREFIX: &str = "_copy_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// `_copy_yyyymmddHHMMss` for the given wall-clock time.
pub fn timestamp_suffix(now: NaiveDateTime) -> String {
    format!("{TIMESTAMP_SUFFIX_PREFIX}{}", now.format(TIMESTAMP_FORMAT))
}

pub fn now_suffix_time() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Turns any string into a valid local sketch folder name.
///
/// A timestamp suffix is appended when `exists_already` is set or `now` is
/// given; `now` falls back to the current local time. Without a suffix, a
/// name that is already valid comes back unchanged.
pub fn to_valid_sketch_folder_name(
    candidate: &str,
    exists_already: bool,
    now: Option<NaiveDateTime>,
) -> String {
    let suffix = if exists_already || now.is_some() {
        timestamp_suffix(now.unwrap_or_else(now_suffix_time))
    } else {
        String::new()
    };

    if suffix.is_empty() && validate_sketch_folder_name(candidate).is_ok() {
        return candidate.to_string();
    }

    let base = if candidate.is_empty() {
        DEFAULT_SKETCH_FOLDER_NAME.to_string()
    } else {
        candidate
            .chars()
            .enumerate()
            .map(|(index, ch)| match index {
                0 if is_first_char(ch) => ch,
                0 => DEFAULT_FALLBACK_FIRST_CHAR,
                _ if is_sketch_char(ch) => ch,
                _ => DEFAULT_FALLBACK_CHAR,
            })
            .collect()
    };

    join_with_suffix(&base, &suffix, MAX_SKETCH_FOLDER_NAME_LEN)
}

/// Turns any string into a valid cloud sketch folder name, appending the
/// timestamp suffix for `now` when given.
pub fn to_valid_cloud_sketch_folder_name(candidate: &str, now: Option<NaiveDateTime>) -> String {
    let suffix = now.map(timestamp_suffix).unwrap_or_default();

    let base = if candidate.is_empty() {
        DEFAULT_CLOUD_SKETCH_FOLDER_NAME.to_string()
    } else {
        candidate
            .chars()
            .map(|ch| if is_cloud_char(ch) { ch } else { DEFAULT_FALLBACK_CHAR })
            .collect()
    };

    join_with_suffix(&base, &suffix, MAX_CLOUD_SKETCH_FOLDER_NAME_LEN)
}

fn join_with_suffix(base: &str, suffix: &str, max: usize) -> String {
    let keep = max.saturating_sub(suffix.chars().count());
    let mut name: String = base.chars().take(keep).collect();
    name.push_str(suffix);
    name
}

#[cfg(test)]
mod tests {
    use super::{
        timestamp_suffix, to_valid_cloud_sketch_folder_name, to_valid_sketch_folder_name,
        DEFAULT_FALLBACK_CHAR, DEFAULT_FALLBACK_FIRST_CHAR, DEFAULT_SKETCH_FOLDER_NAME,
    };
    use crate::validate::{validate_cloud_sketch_folder_name, validate_sketch_folder_name};
    use chrono::{DateTime, NaiveDateTime};
    use proptest::prelude::*;

    const SIXTY_FOUR_DIGITS: &str =
        "0123456789012345678901234567890123456789012345678901234567890123";

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).expect("epoch").naive_utc()
    }

    #[test]
    fn timestamp_suffix_is_fixed_width() {
        assert_eq!(timestamp_suffix(epoch()), "_copy_19700101000000");
        let later = DateTime::from_timestamp(1_700_000_000, 0)
            .expect("timestamp")
            .naive_utc();
        assert_eq!(timestamp_suffix(later), "_copy_20231114221320");
    }

    #[test]
    fn to_valid_sketch_folder_name_without_suffix() {
        let fallback_pair = format!("{DEFAULT_FALLBACK_FIRST_CHAR}{DEFAULT_FALLBACK_CHAR}");
        let cases = [
            ("", DEFAULT_SKETCH_FOLDER_NAME.to_string()),
            (" ", DEFAULT_FALLBACK_FIRST_CHAR.to_string()),
            ("  ", fallback_pair),
            (SIXTY_FOUR_DIGITS, SIXTY_FOUR_DIGITS[..63].to_string()),
            ("foo bar", "foo_bar".to_string()),
            ("vAlid", "vAlid".to_string()),
        ];
        for (input, expected) in cases {
            assert_eq!(to_valid_sketch_folder_name(input, false, None), expected);
        }
    }

    #[test]
    fn to_valid_sketch_folder_name_with_timestamp_suffix() {
        let suffix = timestamp_suffix(epoch());
        let cases = [
            ("", format!("{DEFAULT_SKETCH_FOLDER_NAME}{suffix}")),
            (" ", format!("{DEFAULT_FALLBACK_FIRST_CHAR}{suffix}")),
            (
                "  ",
                format!("{DEFAULT_FALLBACK_FIRST_CHAR}{DEFAULT_FALLBACK_CHAR}{suffix}"),
            ),
            (
                SIXTY_FOUR_DIGITS,
                format!("0123456789012345678901234567890123456789012{suffix}"),
            ),
            ("foo bar", format!("foo_bar{suffix}")),
            ("vAlid", format!("vAlid{suffix}")),
        ];
        for (input, expected) in cases {
            let actual = to_valid_sketch_folder_name(input, true, Some(epoch()));
            assert_eq!(actual, expected);
            assert!(actual.len() <= 63);
        }
    }

    #[test]
    fn to_valid_sketch_folder_name_uses_current_time_when_exists() {
        let name = to_valid_sketch_folder_name("blink", true, None);
        assert!(name.starts_with("blink_copy_"));
        assert_eq!(name.len(), "blink".len() + 20);
    }

    #[test]
    fn to_valid_sketch_folder_name_truncates_valid_input() {
        let input = "a".repeat(67);
        assert_eq!(to_valid_sketch_folder_name(&input, false, None), "a".repeat(63));
    }

    #[test]
    fn to_valid_sketch_folder_name_keeps_dashes_and_dots() {
        assert_eq!(
            to_valid_sketch_folder_name("my-sketch.v2", true, Some(epoch())),
            "my-sketch.v2_copy_19700101000000"
        );
        assert_eq!(to_valid_sketch_folder_name("_x+y", false, None), "0x_y");
    }

    #[test]
    fn to_valid_cloud_sketch_folder_name_maps_cases() {
        let cases = [
            ("sketch", "sketch"),
            ("can-contain-slash-and-dot.ino", "can_contain_slash_and_dot_ino"),
            ("regex++", "regex__"),
            ("dots...", "dots___"),
            ("No Spaces", "No_Spaces"),
            ("_startsWithUnderscore", "_startsWithUnderscore"),
            ("Invalid+Char.ino", "Invalid_Char_ino"),
            ("", "sketch"),
            ("/", "_"),
            ("//trash/", "__trash_"),
            (
                "63Length_012345678901234567890123456789012345678901234567890123",
                "63Length_012345678901234567890123456",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(to_valid_cloud_sketch_folder_name(input, None), expected);
        }
    }

    #[test]
    fn to_valid_cloud_sketch_folder_name_with_suffix_fits() {
        let name = to_valid_cloud_sketch_folder_name(&"x".repeat(40), Some(epoch()));
        assert_eq!(name, format!("{}_copy_19700101000000", "x".repeat(16)));
        assert_eq!(validate_cloud_sketch_folder_name(&name), Ok(()));
    }

    proptest! {
        #[test]
        fn sanitized_local_names_validate(input in any::<String>(), exists in any::<bool>()) {
            let name = to_valid_sketch_folder_name(&input, exists, None);
            prop_assert_eq!(validate_sketch_folder_name(&name), Ok(()));
        }

        #[test]
        fn sanitized_cloud_names_validate(input in any::<String>(), suffixed in any::<bool>()) {
            let now = suffixed.then(epoch);
            let name = to_valid_cloud_sketch_folder_name(&input, now);
            prop_assert_eq!(validate_cloud_sketch_folder_name(&name), Ok(()));
        }

        #[test]
        fn valid_local_names_are_unchanged(input in "[a-zA-Z0-9][a-zA-Z0-9_.-]{0,62}") {
            prop_assert_eq!(to_valid_sketch_folder_name(&input, false, None), input);
        }

        #[test]
        fn valid_cloud_names_are_unchanged(input in "[a-zA-Z0-9_]{1,36}") {
            prop_assert_eq!(to_valid_cloud_sketch_folder_name(&input, None), input);
        }
    }
}
