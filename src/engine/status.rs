//! Sale status classification and the rolling edit window.

use crate::domain::{Role, SaleStatus, TimeMs, UserId};

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_SEC: i64 = 1_000;

/// Classify a sale as ONLINE or OFFLINE at creation time.
///
/// The server is authoritative: a sale is OFFLINE when the client asked to
/// backdate it, or when the supplied sale date deviates from server time by
/// more than `tolerance_secs` in either direction. The client flag can force
/// OFFLINE but cannot force ONLINE for a stale timestamp. The result is
/// stored with the sale and never recomputed.
pub fn classify_status(
    sale_date: TimeMs,
    now: TimeMs,
    backdate_requested: bool,
    tolerance_secs: i64,
) -> SaleStatus {
    if backdate_requested {
        return SaleStatus::Offline;
    }
    let drift_ms = (now.as_i64() - sale_date.as_i64()).abs();
    if drift_ms > tolerance_secs * MS_PER_SEC {
        SaleStatus::Offline
    } else {
        SaleStatus::Online
    }
}

/// Whether `actor` may edit a sale right now.
///
/// Managers and admins may always edit. A chatter may edit their own sale
/// while `now - sale_date` is at most the window; the boundary is inclusive,
/// a sale exactly `window_hours` old is still editable. Other chatters never
/// may.
pub fn can_edit(
    actor_role: Role,
    sale_owner_id: &UserId,
    actor_id: &UserId,
    sale_date: TimeMs,
    now: TimeMs,
    window_hours: i64,
) -> bool {
    match actor_role {
        Role::Admin | Role::ChatterManager => true,
        Role::Chatter => {
            sale_owner_id == actor_id
                && now.as_i64() - sale_date.as_i64() <= window_hours * MS_PER_HOUR
        }
    }
}
