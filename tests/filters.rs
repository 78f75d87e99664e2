use financial_data_api::service::api::financial_data::FinancialDataQuery;
use financial_data_api::service::finance::{
    FilterBounds, FilterError, FilterParams, SortDirection, SortKey, StatementQuery,
};

fn some(v: &str) -> Option<String> {
    Some(v.to_string())
}

#[test]
fn parses_all_bounds() {
    let params = FilterParams {
        start_year: some("2019"),
        end_year: some("2023"),
        min_revenue: some("1e9"),
        max_revenue: some("400000000000"),
        min_net_income: some("-5.5"),
        max_net_income: some(" 100 "),
    };

    let bounds = FilterBounds::try_from(params).expect("valid bounds");

    assert_eq!(
        bounds,
        FilterBounds {
            start_year: some("2019"),
            end_year: some("2023"),
            min_revenue: Some(1e9),
            max_revenue: Some(400_000_000_000.0),
            min_net_income: Some(-5.5),
            max_net_income: Some(100.0),
        }
    );
}

#[test]
fn blank_values_mean_no_bound() {
    let params = FilterParams {
        start_year: some(""),
        min_revenue: some("   "),
        ..Default::default()
    };

    let bounds = FilterBounds::try_from(params).expect("blank is allowed");

    assert_eq!(bounds, FilterBounds::default());
}

#[test]
fn non_numeric_amount_is_rejected_with_context() {
    let params = FilterParams {
        min_revenue: some("lots"),
        ..Default::default()
    };

    let err = FilterBounds::try_from(params).expect_err("must reject");

    assert_eq!(
        err,
        FilterError::InvalidNumber {
            param: "min_revenue",
            value: "lots".into(),
        }
    );
    assert!(err.to_string().contains("min_revenue"));
}

#[test]
fn non_finite_amounts_are_rejected() {
    for raw in ["NaN", "inf", "-infinity"] {
        let params = FilterParams {
            max_net_income: some(raw),
            ..Default::default()
        };
        assert!(
            matches!(
                FilterBounds::try_from(params),
                Err(FilterError::InvalidNumber { param: "max_net_income", .. })
            ),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn non_digit_year_is_rejected() {
    let params = FilterParams {
        end_year: some("20x1"),
        ..Default::default()
    };

    assert_eq!(
        FilterBounds::try_from(params),
        Err(FilterError::InvalidYear {
            param: "end_year",
            value: "20x1".into(),
        })
    );
}

#[test]
fn sort_key_resolution() {
    assert_eq!(SortKey::parse(None), SortKey::Date);
    assert_eq!(SortKey::parse(Some("date")), SortKey::Date);
    assert_eq!(SortKey::parse(Some("revenue")), SortKey::Revenue);
    assert_eq!(SortKey::parse(Some("netIncome")), SortKey::NetIncome);
    assert_eq!(SortKey::parse(Some("grossProfit")), SortKey::Date);
    assert_eq!(SortKey::parse(Some("Revenue")), SortKey::Date);
}

#[test]
fn only_desc_means_descending() {
    assert_eq!(SortDirection::parse("desc"), SortDirection::Descending);
    assert_eq!(SortDirection::parse("DESC"), SortDirection::Descending);
    assert_eq!(SortDirection::parse("Desc"), SortDirection::Descending);
    assert_eq!(SortDirection::parse("asc"), SortDirection::Ascending);
    assert_eq!(SortDirection::parse("descending"), SortDirection::Ascending);
    assert_eq!(SortDirection::parse(""), SortDirection::Ascending);
}

#[test]
fn query_defaults_to_date_descending() {
    let request = StatementQuery::try_from(FinancialDataQuery::default()).expect("empty query");

    assert_eq!(request.sort_key, SortKey::Date);
    assert_eq!(request.sort_direction, SortDirection::Descending);
    assert_eq!(request.bounds, FilterBounds::default());
}

#[test]
fn query_carries_sort_and_bounds() {
    let query = FinancialDataQuery {
        min_net_income: some("10"),
        sort_by: some("netIncome"),
        sort_direction: some("asc"),
        ..Default::default()
    };

    let request = StatementQuery::try_from(query).expect("valid query");

    assert_eq!(request.sort_key, SortKey::NetIncome);
    assert_eq!(request.sort_direction, SortDirection::Ascending);
    assert_eq!(request.bounds.min_net_income, Some(10.0));
}
