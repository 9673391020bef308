use serde::Serialize;

use crate::inputs::PaymentSchedule;

/// 장비 대금 지급 이벤트 (월, 장비비 대비 비율).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentEvent {
    pub month: f64,
    pub percentage: f64,
}

/// 지급 일정을 지급 이벤트 목록으로 펼친다.
///
/// 순서는 고정이다: 계약금(0개월), 선택 마일스톤(입력 순서), 선적 전 지급,
/// 최종 지급(커미셔닝 월 + 지급조건/30). 비율 합은 검사하지 않는다.
pub fn expand(schedule: &PaymentSchedule, commissioning_month: f64) -> Vec<PaymentEvent> {
    let mut events = Vec::with_capacity(schedule.optional_milestones.len() + 3);
    events.push(PaymentEvent {
        month: 0.0,
        percentage: schedule.downpayment_percent,
    });
    events.extend(schedule.optional_milestones.iter().map(|m| PaymentEvent {
        month: m.month,
        percentage: m.percentage,
    }));
    events.push(PaymentEvent {
        month: schedule.pre_shipment_month,
        percentage: schedule.pre_shipment_percent,
    });
    events.push(PaymentEvent {
        month: commissioning_month + schedule.final_payment_terms.offset_months(),
        percentage: schedule.final_payment_percent,
    });
    events
}
