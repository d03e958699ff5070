//! 터미널 출력용 화면 구성
use crate::auction::model::{Bid, Plate, PlateDetail};
use crate::bidding::contract::can_bid;
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const NOT_FOUND: &str = "Plate not found";

pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn highest(plate: &Plate) -> String {
    plate
        .highest_bid
        .map(money)
        .unwrap_or_else(|| "No bids yet".to_string())
}

/// 마감 시간이 지났으면 서버 플래그와 무관하게 Closed로 표시
pub fn status(plate: &Plate, now: DateTime<Utc>) -> &'static str {
    if can_bid(plate, now) {
        "Active"
    } else {
        "Closed"
    }
}

pub fn plate_list(plates: &[Plate], now: DateTime<Utc>) -> String {
    if plates.is_empty() {
        return "No plates available".to_string();
    }
    let mut out = String::from("Available Plates\n");
    for plate in plates {
        let _ = writeln!(
            out,
            "#{:<5} {:<10} {:<7} deadline {}  highest {}",
            plate.id,
            plate.plate_number,
            status(plate, now),
            plate.deadline.format("%Y-%m-%d"),
            highest(plate),
        );
        if !plate.description.is_empty() {
            let _ = writeln!(out, "       {}", plate.description);
        }
    }
    out
}

fn bid_line(bid: &Bid) -> String {
    format!(
        "{:>12}  {}",
        money(bid.amount),
        bid.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// 상세 화면. 입찰 가능한 경우에만 입찰 안내를 붙인다.
pub fn plate_detail(detail: &PlateDetail, now: DateTime<Utc>) -> String {
    let plate = &detail.plate;
    let mut out = String::new();
    let _ = writeln!(out, "{}", plate.plate_number);
    if !plate.description.is_empty() {
        let _ = writeln!(out, "{}", plate.description);
    }
    let _ = writeln!(out, "Deadline: {}", plate.deadline.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "Highest Bid: {}", highest(plate));
    let _ = writeln!(out, "Status: {}", status(plate, now));
    if can_bid(plate, now) {
        let _ = writeln!(out, "Place a bid: plate-auction bid {} <amount>", plate.id);
    }
    let _ = writeln!(out, "\nBid History");
    if detail.bids.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for bid in &detail.bids {
        let _ = writeln!(out, "{}", bid_line(bid));
    }
    out
}

pub fn my_bids(bids: &[Bid]) -> String {
    if bids.is_empty() {
        return "You have no bids".to_string();
    }
    let mut out = String::from("My Bids\n");
    for bid in bids {
        let _ = writeln!(out, "bid #{:<5} plate #{:<5} {}", bid.id, bid.plate_id, bid_line(bid));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn detail(deadline: DateTime<Utc>, highest_bid: Option<f64>) -> PlateDetail {
        PlateDetail {
            plate: Plate {
                id: 3,
                plate_number: "01A123BC".to_string(),
                description: "Lucky numbers".to_string(),
                deadline,
                highest_bid,
                is_active: true,
            },
            bids: highest_bid
                .map(|amount| Bid {
                    id: 1,
                    amount,
                    plate_id: 3,
                    user_id: Some(1),
                    created_at: now() - Duration::hours(1),
                })
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(75.0), "$75.00");
        assert_eq!(money(100.01), "$100.01");
        assert_eq!(money(1250.5), "$1250.50");
    }

    #[test]
    fn open_plate_shows_bid_hint() {
        let out = plate_detail(&detail(now() + Duration::hours(1), Some(50.0)), now());
        assert!(out.contains("Highest Bid: $50.00"));
        assert!(out.contains("Status: Active"));
        assert!(out.contains("plate-auction bid 3"));
    }

    #[test]
    fn expired_plate_hides_bid_hint() {
        let out = plate_detail(&detail(now() - Duration::hours(1), None), now());
        assert!(out.contains("Status: Closed"));
        assert!(out.contains("No bids yet"));
        assert!(!out.contains("Place a bid"));
    }

    #[test]
    fn list_marks_each_plate() {
        let open = detail(now() + Duration::hours(1), Some(10.0)).plate;
        let mut closed = detail(now() + Duration::hours(1), None).plate;
        closed.id = 4;
        closed.is_active = false;
        let out = plate_list(&[open, closed], now());
        assert!(out.contains("#3"));
        assert!(out.contains("#4"));
        assert_eq!(out.matches("Closed").count(), 1);
        assert_eq!(plate_list(&[], now()), "No plates available");
    }
}
