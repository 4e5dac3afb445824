//! Balance derivation from the transaction log.

use smartlearn_ledger::{BalanceOwner, Transaction, TransactionStatus};

/// Per-owner totals derived from completed log entries.
///
/// Earnings and withdrawals are summed separately and subtracted once, so
/// the available figure saturates at zero no matter what order a malformed
/// history interleaves its entries in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerBalance {
    pub owner: BalanceOwner,
    pub total_earned: u64,
    pub total_withdrawn: u64,
}

impl OwnerBalance {
    pub fn available(&self) -> u64 {
        self.total_earned.saturating_sub(self.total_withdrawn)
    }
}

/// Scan the log and total the completed entries attributed to `owner`.
pub fn balance_report(log: &[Transaction], owner: BalanceOwner) -> OwnerBalance {
    let mut report = OwnerBalance {
        owner,
        total_earned: 0,
        total_withdrawn: 0,
    };

    for entry in log {
        if entry.status != TransactionStatus::Completed || entry.kind.owner() != owner {
            continue;
        }
        if entry.kind.is_earning() {
            report.total_earned = report.total_earned.saturating_add(entry.amount);
        } else {
            report.total_withdrawn = report.total_withdrawn.saturating_add(entry.amount);
        }
    }

    report
}

/// What `owner` could withdraw right now.
pub fn available_balance(log: &[Transaction], owner: BalanceOwner) -> u64 {
    balance_report(log, owner).available()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use smartlearn_core::{TransactionId, UserId};
    use smartlearn_ledger::TransactionKind;

    use super::*;

    fn entry(kind: TransactionKind, amount: u64, status: TransactionStatus) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            user_id: UserId::new(),
            user_name: "Balance Test".to_string(),
            amount,
            kind,
            status,
            date: Utc::now(),
            detail: String::new(),
        }
    }

    fn class_earning(teacher_id: UserId, amount: u64, status: TransactionStatus) -> Transaction {
        entry(
            TransactionKind::LiveClass {
                class_id: "l1".into(),
                teacher_id,
            },
            amount,
            status,
        )
    }

    fn teacher_withdrawal(teacher_id: UserId, amount: u64) -> Transaction {
        entry(
            TransactionKind::Withdrawal {
                owner: BalanceOwner::Teacher { teacher_id },
                destination: "Airtel Money 0991 234 567".to_string(),
            },
            amount,
            TransactionStatus::Completed,
        )
    }

    #[test]
    fn only_completed_entries_count() {
        let teacher_id = UserId::new();
        let owner = BalanceOwner::Teacher { teacher_id };
        let log = vec![
            class_earning(teacher_id, 10_000, TransactionStatus::Completed),
            class_earning(teacher_id, 5_000, TransactionStatus::Pending),
            class_earning(teacher_id, 7_000, TransactionStatus::Failed),
        ];

        assert_eq!(available_balance(&log, owner), 10_000);
    }

    #[test]
    fn teacher_earnings_do_not_leak_into_the_platform_total() {
        let teacher_id = UserId::new();
        let log = vec![
            class_earning(teacher_id, 500, TransactionStatus::Completed),
            entry(
                TransactionKind::Video {
                    video_id: "v2".into(),
                },
                1_000,
                TransactionStatus::Completed,
            ),
        ];

        assert_eq!(available_balance(&log, BalanceOwner::Platform), 1_000);
        assert_eq!(
            available_balance(&log, BalanceOwner::Teacher { teacher_id }),
            500
        );
    }

    #[test]
    fn a_withdrawal_heavy_history_cannot_underflow() {
        let teacher_id = UserId::new();
        let owner = BalanceOwner::Teacher { teacher_id };
        // Newest first: the withdrawal precedes the earning in the log.
        let log = vec![
            teacher_withdrawal(teacher_id, 9_000),
            class_earning(teacher_id, 4_000, TransactionStatus::Completed),
        ];

        let report = balance_report(&log, owner);
        assert_eq!(report.total_earned, 4_000);
        assert_eq!(report.total_withdrawn, 9_000);
        assert_eq!(report.available(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn available_matches_the_signed_sum_clamped_at_zero(
            entries in proptest::collection::vec(
                (1u64..50_000, any::<bool>(), 0u8..3, any::<bool>()),
                0..40,
            )
        ) {
            let teacher_id = UserId::new();
            let owner = BalanceOwner::Teacher { teacher_id };

            let mut log = Vec::new();
            let mut signed: i128 = 0;
            for (amount, is_withdrawal, status_pick, belongs_to_owner) in entries {
                let status = match status_pick {
                    0 => TransactionStatus::Completed,
                    1 => TransactionStatus::Pending,
                    _ => TransactionStatus::Failed,
                };
                let subject = if belongs_to_owner {
                    teacher_id
                } else {
                    UserId::new()
                };
                let tx = if is_withdrawal {
                    let mut tx = teacher_withdrawal(subject, amount);
                    tx.status = status;
                    tx
                } else {
                    class_earning(subject, amount, status)
                };

                if belongs_to_owner && status == TransactionStatus::Completed {
                    if is_withdrawal {
                        signed -= amount as i128;
                    } else {
                        signed += amount as i128;
                    }
                }
                log.push(tx);
            }

            let expected = signed.max(0) as u64;
            prop_assert_eq!(available_balance(&log, owner), expected);
        }
    }
}
