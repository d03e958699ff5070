/// 입찰 가능 여부와 입찰 금액 검증 규칙
/// 최종 판정은 권한 서버가 하며, 여기서는 제출 전에 걸러낼 수 있는 것만 검사한다.
// region:    --- Imports
use crate::auction::model::{BidRequest, Plate, PlateDetail};
use chrono::{DateTime, Utc};
use thiserror::Error;

// endregion: --- Imports

// region:    --- Outcomes

/// 검증을 통과한 입찰 (제출 요청 포함)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accepted {
    pub request: BidRequest,
}

/// 제출 전 거절 사유
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejected {
    #[error("Bid amount must be a number")]
    NotANumber,
    #[error("Bid amount must be positive")]
    NotPositive,
    #[error("Bid amount too low: must exceed current highest bid of ${highest:.2}")]
    TooLow { highest: f64 },
    #[error("Bidding is closed")]
    Closed,
}

// endregion: --- Outcomes

// region:    --- Rules

/// 입찰 가능 여부
///
/// `is_active`가 아직 갱신되지 않았더라도 마감 시간이 지났으면 입찰할 수 없다.
pub fn can_bid(plate: &Plate, now: DateTime<Utc>) -> bool {
    plate.is_active && now < plate.deadline
}

/// 입찰 취소 가능 여부 (마감 전까지만)
pub fn can_withdraw(plate: &Plate, now: DateTime<Utc>) -> bool {
    now < plate.deadline
}

/// 입력값을 금액으로 변환
pub fn parse_amount(raw: &str) -> Result<f64, Rejected> {
    let amount: f64 = raw.trim().parse().map_err(|_| Rejected::NotANumber)?;
    if !amount.is_finite() {
        return Err(Rejected::NotANumber);
    }
    if amount <= 0.0 {
        return Err(Rejected::NotPositive);
    }
    Ok(amount)
}

fn exceeds(amount: f64, highest: Option<f64>) -> Result<(), Rejected> {
    match highest {
        Some(highest) if amount <= highest => Err(Rejected::TooLow { highest }),
        _ => Ok(()),
    }
}

/// 입찰 금액 검증
///
/// 양의 유한한 숫자여야 하며 현재 최고 입찰가보다 엄격히 커야 한다 (동액 거절).
pub fn validate_amount(raw: &str, plate: &Plate) -> Result<Accepted, Rejected> {
    let amount = parse_amount(raw)?;
    exceeds(amount, plate.highest_bid)?;
    Ok(Accepted {
        request: BidRequest {
            plate_id: plate.id,
            amount,
        },
    })
}

/// 본인 입찰 금액 변경 검증
///
/// 자신의 기존 입찰은 제외하고 다른 입찰 중 최고가보다 커야 한다.
pub fn validate_raise(raw: &str, detail: &PlateDetail, bid_id: i64) -> Result<f64, Rejected> {
    let amount = parse_amount(raw)?;
    exceeds(amount, detail.highest_bid_excluding(bid_id))?;
    Ok(amount)
}

// endregion: --- Rules

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::model::Bid;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn plate(highest_bid: Option<f64>, is_active: bool, deadline: DateTime<Utc>) -> Plate {
        Plate {
            id: 1,
            plate_number: "01A123BC".to_string(),
            description: "test plate".to_string(),
            deadline,
            highest_bid,
            is_active,
        }
    }

    #[test]
    fn inactive_plate_never_accepts_bids() {
        let closed = plate(Some(50.0), false, now() + Duration::hours(1));
        assert!(!can_bid(&closed, now()));
        assert!(!can_bid(&closed, now() - Duration::days(365)));
        assert!(!can_bid(&closed, now() + Duration::days(365)));
    }

    #[test]
    fn passed_deadline_overrides_stale_active_flag() {
        let stale = plate(Some(50.0), true, now() - Duration::minutes(1));
        assert!(!can_bid(&stale, now()));

        let at_deadline = plate(Some(50.0), true, now());
        assert!(!can_bid(&at_deadline, now()));

        let open = plate(Some(50.0), true, now() + Duration::hours(1));
        assert!(can_bid(&open, now()));
    }

    #[test]
    fn withdraw_only_before_deadline() {
        let p = plate(None, false, now() + Duration::hours(1));
        assert!(can_withdraw(&p, now()));
        assert!(!can_withdraw(&p, now() + Duration::hours(1)));
    }

    #[test]
    fn tie_is_rejected_and_one_cent_more_accepted() {
        let p = plate(Some(100.00), true, now() + Duration::hours(1));
        assert_eq!(
            validate_amount("100.00", &p),
            Err(Rejected::TooLow { highest: 100.0 })
        );
        let accepted = validate_amount("100.01", &p).unwrap();
        assert_eq!(accepted.request.plate_id, 1);
        assert_eq!(accepted.request.amount, 100.01);
    }

    #[test]
    fn non_positive_and_non_numeric_rejected() {
        let p = plate(None, true, now() + Duration::hours(1));
        assert_eq!(validate_amount("-5", &p), Err(Rejected::NotPositive));
        assert_eq!(validate_amount("0", &p), Err(Rejected::NotPositive));
        assert_eq!(validate_amount("abc", &p), Err(Rejected::NotANumber));
        assert_eq!(validate_amount("", &p), Err(Rejected::NotANumber));
        assert_eq!(validate_amount("NaN", &p), Err(Rejected::NotANumber));
        assert_eq!(validate_amount("inf", &p), Err(Rejected::NotANumber));
    }

    #[test]
    fn first_bid_only_needs_to_be_positive() {
        let p = plate(None, true, now() + Duration::hours(1));
        assert!(validate_amount("0.01", &p).is_ok());
    }

    #[test]
    fn scenario_higher_and_lower_bids() {
        let p = plate(Some(50.00), true, now() + Duration::hours(1));
        assert_eq!(validate_amount("75.00", &p).unwrap().request.amount, 75.0);

        let err = validate_amount("40.00", &p).unwrap_err();
        assert!(err.to_string().contains("too low"));
    }

    #[test]
    fn raise_ignores_own_bid() {
        let detail = PlateDetail {
            plate: plate(Some(120.0), true, now() + Duration::hours(1)),
            bids: vec![
                Bid {
                    id: 10,
                    amount: 80.0,
                    plate_id: 1,
                    user_id: Some(2),
                    created_at: now() - Duration::hours(2),
                },
                Bid {
                    id: 11,
                    amount: 120.0,
                    plate_id: 1,
                    user_id: Some(3),
                    created_at: now() - Duration::hours(1),
                },
            ],
        };

        // 다른 입찰보다만 높으면 된다 (자기 기존 금액은 비교 대상이 아님)
        assert_eq!(validate_raise("90", &detail, 11), Ok(90.0));
        assert_eq!(
            validate_raise("100", &detail, 10),
            Err(Rejected::TooLow { highest: 120.0 })
        );
    }
}

// endregion: --- Tests
