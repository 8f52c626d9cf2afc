use arith_result::Error;
use arith_types::{
    DateValue, DecimalValue, IntervalDayTime, IntervalYearMonth, RuntimeValue, TimestampValue,
    TypeDescriptor, TypeKind,
};

fn parse(ty: &str, text: &str) -> Result<RuntimeValue, Error> {
    let descriptor: TypeDescriptor = ty.parse()?;
    RuntimeValue::parse(&descriptor, text)
}

#[test]
fn parses_every_kind() {
    let cases = [
        ("tinyint", "-128", TypeKind::Byte),
        ("smallint", "32767", TypeKind::Short),
        ("int", "12", TypeKind::Int),
        ("bigint", "-9223372036854775808", TypeKind::Long),
        ("float", "1.5", TypeKind::Float),
        ("double", "1e300", TypeKind::Double),
        ("decimal(5,2)", "234.97", TypeKind::Decimal),
        ("varchar(10)", "104.5", TypeKind::VarcharLike),
        ("date", "2001-01-01", TypeKind::Date),
        ("timestamp", "2001-01-01 01:02:03", TypeKind::Timestamp),
        ("interval_year_month", "1-2", TypeKind::IntervalYearMonth),
        ("interval_day_time", "1 2:3:4", TypeKind::IntervalDayTime),
    ];
    for (ty, text, kind) in cases {
        let value = parse(ty, text).unwrap_or_else(|e| panic!("{ty} '{text}': {e}"));
        assert_eq!(value.kind(), kind, "{ty}");
    }
}

#[test]
fn integral_literals_respect_width() {
    assert!(parse("tinyint", "128").is_err());
    assert!(parse("smallint", "40000").is_err());
    assert!(parse("int", "abc").is_err());
}

#[test]
fn decimal_literal_must_fit_declared_type() {
    assert_eq!(
        parse("decimal(5,2)", "234.97").unwrap(),
        RuntimeValue::Decimal("234.97".parse::<DecimalValue>().unwrap())
    );
    assert!(matches!(
        parse("decimal(5,2)", "1234.5"),
        Err(Error::InvalidArgumentError(_))
    ));
    assert!(parse("decimal(5,2)", "1.234").is_err());
}

#[test]
fn string_literals_are_kept_verbatim() {
    assert_eq!(
        parse("string", " not a number ").unwrap(),
        RuntimeValue::Varchar(" not a number ".to_owned())
    );
}

#[test]
fn temporal_literals_display_canonically() {
    assert_eq!(parse("date", "2001-1-2").unwrap().to_string(), "2001-01-02");
    assert_eq!(
        parse("timestamp", "2001-01-01 1:2:3.50").unwrap().to_string(),
        "2001-01-01 01:02:03.5"
    );
    assert_eq!(
        parse("interval_day_time", "-0 0:0:1").unwrap(),
        RuntimeValue::IntervalDayTime(IntervalDayTime::new(-1, 0).unwrap())
    );
    assert_eq!(
        parse("interval_year_month", "-0-1").unwrap(),
        RuntimeValue::IntervalYearMonth(IntervalYearMonth::from_months(-1))
    );
}

#[test]
fn conversions_into_runtime_value() {
    let date: DateValue = "2001-01-01".parse().unwrap();
    let ts: TimestampValue = date.midnight();
    assert_eq!(RuntimeValue::from(date).kind(), TypeKind::Date);
    assert_eq!(RuntimeValue::from(ts).to_string(), "2001-01-01 00:00:00");
}
