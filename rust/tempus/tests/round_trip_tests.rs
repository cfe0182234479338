use tempus::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone,
};

const SAMPLES: usize = 2_000;

fn random_offset() -> FixedOffset {
    FixedOffset::east(fastrand::i32(-86_399..=86_399)).unwrap()
}

#[test]
fn test_day_count_round_trip() {
    fastrand::seed(3_141_592_653);
    let lo = NaiveDate::MIN.num_days_from_ce();
    let hi = NaiveDate::MAX.num_days_from_ce();
    for _ in 0..SAMPLES {
        let days = fastrand::i32(lo..=hi);
        let date = NaiveDate::from_num_days_from_ce(days).unwrap();
        assert_eq!(date.num_days_from_ce(), days);
        assert_eq!(
            NaiveDate::from_ymd(date.year(), date.month(), date.day()).unwrap(),
            date
        );
        assert_eq!(NaiveDate::from_yo(date.year(), date.ordinal()).unwrap(), date);

        let week = date.iso_week();
        assert_eq!(
            NaiveDate::from_isoywd(week.year(), week.week(), week.weekday()).unwrap(),
            date
        );
        assert_eq!(week.weekday(), date.weekday());

        if let Ok(next) = date.succ() {
            assert_eq!(next.weekday(), date.weekday().succ());
            assert_eq!(next - date, Duration::days(1));
        }
    }
}

#[test]
fn test_date_text_round_trip() {
    fastrand::seed(2_718_281_828);
    let lo = NaiveDate::MIN.num_days_from_ce();
    let hi = NaiveDate::MAX.num_days_from_ce();
    for _ in 0..SAMPLES {
        let date = NaiveDate::from_num_days_from_ce(fastrand::i32(lo..=hi)).unwrap();
        let text = date.to_string();
        assert_eq!(text.parse::<NaiveDate>().unwrap(), date, "{text}");
    }
}

#[test]
fn test_rfc3339_round_trip() {
    fastrand::seed(1_618_033_988);
    for _ in 0..SAMPLES {
        let secs = fastrand::i64(-100_000_000_000..=100_000_000_000);
        let nanos = fastrand::u32(..1_000_000_000);
        let utc = DateTime::from_timestamp(secs, nanos).unwrap();
        let dt = utc.to_fixed(random_offset()).unwrap();

        for format in [SecondsFormat::Nanos, SecondsFormat::AutoSi] {
            let text = dt.to_rfc3339_opts(format, false);
            let back = DateTime::parse_from_rfc3339(&text).unwrap();
            assert_eq!(back, dt, "{text}");
            assert_eq!(back.offset(), dt.offset(), "{text}");
            assert_eq!(back.naive_local(), dt.naive_local(), "{text}");
        }

        let text = utc.to_rfc3339_opts(SecondsFormat::Secs, true);
        let back: DateTime<tempus::Utc> = text.parse().unwrap();
        assert_eq!(back.timestamp(), secs, "{text}");
    }
}

#[test]
fn test_rfc2822_round_trip() {
    fastrand::seed(1_414_213_562);
    for _ in 0..SAMPLES {
        // Years 1970..=2603 at whole minutes of offset.
        let secs = fastrand::i64(0..=20_000_000_000);
        let offset = FixedOffset::east(fastrand::i32(-1_439..=1_439) * 60).unwrap();
        let dt = offset.timestamp(secs, 0).unwrap();
        let text = dt.to_rfc2822().unwrap();
        let back = DateTime::parse_from_rfc2822(&text).unwrap();
        assert_eq!(back, dt, "{text}");
        assert_eq!(back.offset(), offset, "{text}");
    }
}

#[test]
fn test_pattern_round_trip() {
    fastrand::seed(1_732_050_807);
    let patterns = [
        "%Y-%m-%dT%H:%M:%S%.9f%:z",
        "%a, %d %b %Y %I:%M:%S%.f %p %z",
        "%G-W%V-%u %T%.f %z",
        "%Y.%j %H%M%S.%9f %:z",
        "%s.%9f %z",
    ];
    for _ in 0..SAMPLES {
        let secs = fastrand::i64(0..=20_000_000_000);
        let nanos = fastrand::u32(..1_000_000_000);
        let dt = random_offset().timestamp(secs, nanos).unwrap();
        // Offsets with seconds only round-trip through the colon form.
        for pattern in patterns {
            if dt.offset().local_minus_utc() % 60 != 0 && !pattern.contains("%:z") {
                continue;
            }
            let text = dt.format(pattern).unwrap();
            let back = DateTime::parse_from_str(&text, pattern)
                .unwrap_or_else(|e| panic!("{pattern:?} on {text:?}: {e}"));
            assert_eq!(back, dt, "{pattern:?} on {text:?}");
            assert_eq!(back.offset(), dt.offset(), "{pattern:?} on {text:?}");
        }
    }
}

#[test]
fn test_duration_arithmetic_round_trip() {
    fastrand::seed(577_215_664);
    let span = 1_000_000_000_000_000_000i64;
    for _ in 0..SAMPLES {
        let a = Duration::nanoseconds(fastrand::i64(-span..=span));
        let b = Duration::nanoseconds(fastrand::i64(-span..=span));
        let sum = (a + b).unwrap();
        assert_eq!(sum.total_nanos(), a.total_nanos() + b.total_nanos());
        assert_eq!((sum - b).unwrap(), a);
        assert_eq!(a.num_seconds() as i128, a.total_nanos() / 1_000_000_000);
        assert_eq!(a.subsec_nanos() as i128, a.total_nanos() % 1_000_000_000);
        assert_eq!((-a).total_nanos(), -a.total_nanos());
    }
}

#[test]
fn test_naive_datetime_shift_round_trip() {
    fastrand::seed(1_202_056_903);
    for _ in 0..SAMPLES {
        let base = NaiveDateTime::from_timestamp(
            fastrand::i64(-50_000_000_000..=50_000_000_000),
            fastrand::u32(..1_000_000_000),
        )
        .unwrap();
        let shift = Duration::nanoseconds(fastrand::i64(..));
        let moved = (base + shift).unwrap();
        assert_eq!(moved.signed_duration_since(base), shift);
        assert_eq!((moved - shift).unwrap(), base);
        assert_eq!(
            moved.timestamp() as i128 * 1_000_000_000 + moved.timestamp_subsec_nanos() as i128,
            base.timestamp() as i128 * 1_000_000_000
                + base.timestamp_subsec_nanos() as i128
                + shift.total_nanos()
        );
    }
}
