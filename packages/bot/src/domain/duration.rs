//! Human readable mute durations.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format `seconds` using the two largest units, omitting a zero remainder.
///
/// ```
/// use roulette_bot::domain::format_duration;
///
/// assert_eq!(format_duration(90), "1分30秒");
/// assert_eq!(format_duration(3600), "1小时");
/// ```
pub fn format_duration(seconds: u64) -> String {
    if seconds < MINUTE {
        format!("{}秒", seconds)
    } else if seconds < HOUR {
        let (minutes, rest) = (seconds / MINUTE, seconds % MINUTE);
        if rest > 0 {
            format!("{}分{}秒", minutes, rest)
        } else {
            format!("{}分钟", minutes)
        }
    } else if seconds < DAY {
        let (hours, rest) = (seconds / HOUR, (seconds % HOUR) / MINUTE);
        if rest > 0 {
            format!("{}小时{}分钟", hours, rest)
        } else {
            format!("{}小时", hours)
        }
    } else {
        let (days, rest) = (seconds / DAY, (seconds % DAY) / HOUR);
        if rest > 0 {
            format!("{}天{}小时", days, rest)
        } else {
            format!("{}天", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_only() {
        // テスト項目: 60 秒未満は秒のみ
        assert_eq!(format_duration(0), "0秒");
        assert_eq!(format_duration(45), "45秒");
        assert_eq!(format_duration(59), "59秒");
    }

    #[test]
    fn test_minutes_with_and_without_seconds() {
        // テスト項目: 1 時間未満は分（余りがあれば秒も）
        assert_eq!(format_duration(60), "1分钟");
        assert_eq!(format_duration(90), "1分30秒");
        assert_eq!(format_duration(3599), "59分59秒");
    }

    #[test]
    fn test_hours_drop_trailing_zero_minutes() {
        // テスト項目: 1 日未満は時間（余りの分が 0 なら省略、秒は切り捨て）
        assert_eq!(format_duration(3600), "1小时");
        assert_eq!(format_duration(3661), "1小时1分钟");
        assert_eq!(format_duration(3659), "1小时");
    }

    #[test]
    fn test_days_with_and_without_hours() {
        // テスト項目: 1 日以上は日（余りがあれば時間も）
        assert_eq!(format_duration(86400), "1天");
        assert_eq!(format_duration(90000), "1天1小时");
        assert_eq!(format_duration(2 * 86400 + 3599), "2天");
    }
}
