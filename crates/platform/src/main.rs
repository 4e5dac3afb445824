//! Demo walkthrough: one student's day on the platform, end to end.

use tracing::info;

use smartlearn_entitlement::SubscriptionPlan;
use smartlearn_identity::{Registration, Role, User};
use smartlearn_ledger::BalanceOwner;
use smartlearn_platform::{Platform, PlatformError};
use smartlearn_store::{InMemoryBackend, JsonFileBackend, Store};

fn main() -> anyhow::Result<()> {
    smartlearn_observability::init();

    let store = match std::env::var("SMARTLEARN_STORE") {
        Ok(path) => {
            info!(%path, "opening json store");
            Store::open(JsonFileBackend::open(path))
        }
        Err(_) => {
            tracing::warn!("SMARTLEARN_STORE not set; state will not survive this run");
            Store::open(InMemoryBackend::new())
        }
    };

    let platform = Platform::open(store);
    platform.ensure_seeded()?;

    // A student signs up (students are approved immediately) and looks at
    // the paid catalog from outside the paywall.
    let chisomo = existing_or_registered(
        &platform,
        "Chisomo Mwale",
        "chisomo@example.com",
        "0991234567",
        Role::Student,
    )?;
    let student = platform.sign_in(chisomo.id)?;

    let paid_video = "v2".into();
    info!(
        can_watch = platform.can_watch(&student, &paid_video),
        "before subscribing"
    );

    if !platform.is_subscribed(student.user_id) {
        let tx = platform.subscribe(&student, SubscriptionPlan::Monthly, "0991234567")?;
        info!(amount = tx.amount, detail = %tx.detail, "subscription paid");
    }
    info!(
        can_watch = platform.can_watch(&student, &paid_video),
        "after subscribing"
    );

    // Study time: ask the tutor, then buy admission to Mr. Banda's class.
    let answer = platform.ask_tutor("How do I factor x^2 + 5x + 6?", "Mathematics");
    info!(%answer, "tutor replied");

    let class_id = "l1".into();
    if !platform.can_join(&student, &class_id) {
        let tx = platform.join_live_class(&student, &class_id, "0991234567")?;
        info!(amount = tx.amount, detail = %tx.detail, "admission paid");
    }

    let summary = platform.summarize_lesson(
        "MSCE Prep",
        "We reviewed factoring. We practiced past papers. We set revision homework.",
    );
    info!(points = summary.len(), "lesson summarized");

    // A new teacher applies and waits in the approval queue until the
    // admin clears them.
    let admin_account = platform
        .accounts()
        .find_by_email("admin@smartlearn.mw")
        .ok_or_else(|| anyhow::anyhow!("stock admin account missing"))?;
    let admin = platform.sign_in(admin_account.id)?;

    let tembo = existing_or_registered(
        &platform,
        "Ms. Tembo",
        "tembo@example.com",
        "0998765432",
        Role::Teacher,
    )?;
    if !tembo.is_approved {
        platform.approve_teacher(&admin, tembo.id)?;
        info!(teacher = %tembo.name, "teacher approved");
    }
    platform.sign_in(tembo.id)?;

    // Payouts: Mr. Banda's admission earnings sit below the payout minimum,
    // so his request bounces; the platform treasury can pay out.
    let banda_account = platform
        .accounts()
        .find_by_email("banda@smartlearn.mw")
        .ok_or_else(|| anyhow::anyhow!("stock teacher account missing"))?;
    let banda = platform.sign_in(banda_account.id)?;
    let banda_owner = BalanceOwner::Teacher {
        teacher_id: banda.user_id,
    };
    info!(balance = platform.balance_of(banda_owner), "teacher balance");

    match platform.request_withdrawal(&banda, 2_000, "0999000002") {
        Ok(pending) => {
            let tx = platform.settle_withdrawal(pending)?;
            info!(amount = tx.amount, "teacher withdrawal settled");
        }
        Err(PlatformError::Payout(refusal)) => {
            info!(%refusal, "teacher withdrawal refused");
        }
        Err(other) => return Err(other.into()),
    }

    let revenue = platform.platform_revenue();
    info!(
        earned = revenue.total_earned,
        withdrawn = revenue.total_withdrawn,
        available = revenue.available(),
        "platform revenue"
    );

    if revenue.available() >= 20_000 {
        let pending = platform.request_withdrawal(&admin, 20_000, "NBM-001-7733")?;
        let tx = platform.settle_withdrawal(pending)?;
        info!(
            amount = tx.amount,
            remaining = platform.balance_of(BalanceOwner::Platform),
            "treasury withdrawal settled"
        );
    }

    for tx in platform.recent_transactions(5) {
        info!(
            kind = %tx.transaction_type(),
            status = %tx.status,
            amount = tx.amount,
            detail = %tx.detail,
            "ledger entry"
        );
    }

    Ok(())
}

fn existing_or_registered(
    platform: &Platform,
    name: &str,
    email: &str,
    phone: &str,
    role: Role,
) -> anyhow::Result<User> {
    if let Some(user) = platform.accounts().find_by_email(email) {
        return Ok(user);
    }

    let user = platform.accounts().register(Registration {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        role,
    })?;
    info!(user = %user.name, %role, "registered");

    Ok(user)
}
