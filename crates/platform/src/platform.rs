//! Composition root: every engine component wired over one store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use smartlearn_catalog::{Catalog, seed};
use smartlearn_core::{BookId, DomainError, LiveClassId, UserId, VideoId};
use smartlearn_entitlement::{
    AccessPolicy, Entitlements, Subscription, SubscriptionPlan, SubscriptionRegistry,
};
use smartlearn_identity::{Accounts, Registration, Role, User, UserDirectory};
use smartlearn_ledger::{
    BalanceOwner, Transaction, TransactionDraft, TransactionFilter, TransactionKind,
    TransactionLedger, TransactionStatus,
};
use smartlearn_payout::{
    InstantRail, OwnerBalance, PayoutRail, PendingWithdrawal, WithdrawalManager, WithdrawalRequest,
};
use smartlearn_store::Store;
use smartlearn_tutor::{ScriptedTutor, Tutor};

use crate::admission::LedgerAdmissions;
use crate::error::PlatformError;
use crate::payment::{ChargeRequest, MobileMoneyGateway, PaymentDeclined, PaymentGateway, PaymentOutcome};
use crate::session::Session;

/// Stock one-off prices for individual content purchases, in MWK. Content
/// entries carry no per-item price; access to paid items is normally a
/// subscription matter and these cover the standalone-purchase path.
pub const VIDEO_PRICE_MWK: u64 = 1_000;
pub const BOOK_PRICE_MWK: u64 = 3_000;

/// The engine behind the views: accounts, catalog, entitlements, ledger,
/// payouts, payments, and the tutor, all sharing one store.
///
/// Every component holds a clone of the same [`Store`], so a `Platform` is
/// cheap to build and everything observes the same persisted state.
pub struct Platform {
    accounts: Accounts,
    subscriptions: SubscriptionRegistry,
    catalog: Catalog,
    ledger: TransactionLedger<Accounts>,
    payouts: WithdrawalManager<Accounts, Arc<dyn PayoutRail>>,
    entitlements: Entitlements<SubscriptionRegistry, LedgerAdmissions<Accounts>>,
    gateway: Arc<dyn PaymentGateway>,
    tutor: Tutor,
}

impl Platform {
    /// Stock wiring: instant payout rail, mobile-money gateway, scripted
    /// tutor.
    pub fn open(store: Store) -> Self {
        Self::with_collaborators(
            store,
            Arc::new(InstantRail::new()),
            Arc::new(MobileMoneyGateway::new()),
            Tutor::new(ScriptedTutor::new()),
        )
    }

    /// Wire the engine around externally supplied collaborators.
    pub fn with_collaborators(
        store: Store,
        rail: Arc<dyn PayoutRail>,
        gateway: Arc<dyn PaymentGateway>,
        tutor: Tutor,
    ) -> Self {
        let accounts = Accounts::new(store.clone());
        let subscriptions = SubscriptionRegistry::new(store.clone());
        let catalog = Catalog::new(store.clone());
        let ledger = TransactionLedger::new(store, accounts.clone());
        let payouts = WithdrawalManager::new(ledger.clone(), rail);
        let entitlements = Entitlements::new(
            subscriptions.clone(),
            LedgerAdmissions::new(ledger.clone()),
            AccessPolicy::default(),
        );

        Self {
            accounts,
            subscriptions,
            catalog,
            ledger,
            payouts,
            entitlements,
            gateway,
            tutor,
        }
    }

    /// Install the stock accounts and catalog into an empty store.
    ///
    /// Idempotent: existing accounts are found by email and the catalog
    /// seeds only empty collections, so reopening a persisted store changes
    /// nothing.
    pub fn ensure_seeded(&self) -> Result<(), PlatformError> {
        self.staff_account("SmartLearn Admin", "admin@smartlearn.mw", "0999000001", Role::Admin)?;
        let banda =
            self.staff_account("Mr. Banda", "banda@smartlearn.mw", "0999000002", Role::Teacher)?;
        let phiri =
            self.staff_account("Mrs. Phiri", "phiri@smartlearn.mw", "0999000003", Role::Teacher)?;

        self.catalog
            .ensure_seeded(seed::stock_live_classes(banda.id, phiri.id));

        Ok(())
    }

    /// Stock accounts are approved under the platform's own authority; there
    /// is no admin yet to clear the first admin.
    fn staff_account(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        role: Role,
    ) -> Result<User, PlatformError> {
        if let Some(existing) = self.accounts.find_by_email(email) {
            return Ok(existing);
        }

        let user = self.accounts.register(Registration {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            role,
        })?;
        let user = self.accounts.approve(Role::Admin, user.id)?;
        info!(user = %user.id, %role, "seeded stock account");

        Ok(user)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Components
    // ─────────────────────────────────────────────────────────────────────────

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &TransactionLedger<Accounts> {
        &self.ledger
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session & entitlement views
    // ─────────────────────────────────────────────────────────────────────────

    /// Open a session for an authenticated identity.
    ///
    /// Authentication itself happens outside; this checks only account
    /// state. Unknown ids answer `NotFound`; unapproved or locked accounts
    /// answer `Unauthorized`.
    pub fn sign_in(&self, user: UserId) -> Result<Session, PlatformError> {
        let account = self.accounts.find(user).ok_or(DomainError::NotFound)?;
        if !account.in_good_standing() {
            return Err(DomainError::Unauthorized.into());
        }

        info!(user = %account.id, role = %account.role, "session opened");
        Ok(Session::new(account.id, account.name, account.role))
    }

    pub fn is_subscribed(&self, user: UserId) -> bool {
        self.is_subscribed_at(user, Utc::now())
    }

    /// Subscription state is time-dependent; views that project forward
    /// (expiry countdowns) evaluate at the instant they render.
    pub fn is_subscribed_at(&self, user: UserId, now: DateTime<Utc>) -> bool {
        self.entitlements.is_subscribed(user, now)
    }

    pub fn can_watch(&self, session: &Session, video: &VideoId) -> bool {
        self.catalog.video(video).is_some_and(|video| {
            self.entitlements
                .can_access(session.user_id, &video, session.role, Utc::now())
        })
    }

    pub fn can_read(&self, session: &Session, book: &BookId) -> bool {
        self.catalog.book(book).is_some_and(|book| {
            self.entitlements
                .can_access(session.user_id, &book, session.role, Utc::now())
        })
    }

    /// Admission is per class per user; the class's own teacher walks in
    /// without one.
    pub fn can_join(&self, session: &Session, class: &LiveClassId) -> bool {
        self.catalog.live_class(class).is_some_and(|c| {
            c.teacher_id == session.user_id || self.entitlements.can_join(session.user_id, class)
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commerce
    // ─────────────────────────────────────────────────────────────────────────

    /// Charge for a plan and install the subscription.
    ///
    /// The new record replaces whatever the user had, with
    /// `expiry = now + plan.duration()`. A declined charge leaves the
    /// previous subscription untouched.
    pub fn subscribe(
        &self,
        session: &Session,
        plan: SubscriptionPlan,
        phone: &str,
    ) -> Result<Transaction, PlatformError> {
        let tx = self.charge_and_record(
            session,
            plan.price_mwk(),
            TransactionKind::Subscription { plan },
            phone,
            format!("Subscription purchase: {plan} plan"),
        )?;

        self.subscriptions
            .replace(Subscription::starting(session.user_id, plan, Utc::now()));
        info!(user = %session.user_id, %plan, "subscription installed");

        Ok(tx)
    }

    /// Standalone video purchase. Revenue lands on the platform; viewing
    /// access stays a subscription matter.
    pub fn buy_video(
        &self,
        session: &Session,
        video: &VideoId,
        phone: &str,
    ) -> Result<Transaction, PlatformError> {
        let video = self.catalog.video(video).ok_or(DomainError::NotFound)?;

        self.charge_and_record(
            session,
            VIDEO_PRICE_MWK,
            TransactionKind::Video {
                video_id: video.id.clone(),
            },
            phone,
            format!("Video purchase: {}", video.title),
        )
    }

    /// Standalone book purchase, same shape as [`Platform::buy_video`].
    pub fn buy_book(
        &self,
        session: &Session,
        book: &BookId,
        phone: &str,
    ) -> Result<Transaction, PlatformError> {
        let book = self.catalog.book(book).ok_or(DomainError::NotFound)?;

        self.charge_and_record(
            session,
            BOOK_PRICE_MWK,
            TransactionKind::Book {
                book_id: book.id.clone(),
            },
            phone,
            format!("Book purchase: {}", book.title),
        )
    }

    /// Buy one-time admission to a live class.
    ///
    /// The completed ledger entry *is* the admission record; earnings
    /// attribute to the class's teacher.
    pub fn join_live_class(
        &self,
        session: &Session,
        class: &LiveClassId,
        phone: &str,
    ) -> Result<Transaction, PlatformError> {
        let class = self.catalog.live_class(class).ok_or(DomainError::NotFound)?;
        if !class.admission_open() {
            return Err(DomainError::invariant("class has already finished").into());
        }
        if class.teacher_id == session.user_id {
            return Err(DomainError::conflict("teachers host their own classes").into());
        }
        if self.entitlements.can_join(session.user_id, &class.id) {
            return Err(DomainError::conflict("admission already purchased").into());
        }

        self.charge_and_record(
            session,
            class.price,
            TransactionKind::LiveClass {
                class_id: class.id.clone(),
                teacher_id: class.teacher_id,
            },
            phone,
            format!("Live class admission: {}", class.title),
        )
    }

    /// Drive one charge through the gateway and write the outcome down.
    ///
    /// Approved charges become `completed` entries; declined charges become
    /// `failed` entries kept for audit, and the decline is returned to the
    /// caller. Nothing else mutates until the gateway has answered.
    fn charge_and_record(
        &self,
        session: &Session,
        amount: u64,
        kind: TransactionKind,
        phone: &str,
        detail: String,
    ) -> Result<Transaction, PlatformError> {
        let charge = ChargeRequest {
            payer: session.user_id,
            payer_name: session.name.clone(),
            amount,
            kind,
            phone: phone.to_string(),
            detail,
        };

        let pending = self.gateway.initiate(&charge);
        let draft = |status: TransactionStatus| TransactionDraft {
            user_id: charge.payer,
            user_name: charge.payer_name.clone(),
            amount: charge.amount,
            kind: charge.kind.clone(),
            status,
            date: Utc::now(),
            detail: charge.detail.clone(),
        };

        match pending.outcome() {
            PaymentOutcome::Approved => {
                let tx = self.ledger.record(draft(TransactionStatus::Completed))?;
                info!(
                    user = %tx.user_id,
                    amount = tx.amount,
                    kind = %tx.transaction_type(),
                    "payment approved"
                );
                Ok(tx)
            }
            PaymentOutcome::Declined { reason } => {
                self.ledger.record(draft(TransactionStatus::Failed))?;
                warn!(user = %charge.payer, amount = charge.amount, %reason, "payment declined");
                Err(PaymentDeclined { reason }.into())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn transactions(&self, filter: TransactionFilter) -> Vec<Transaction> {
        self.ledger.query(filter).to_vec()
    }

    /// The newest `limit` entries, most recent first.
    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        self.ledger.all().into_iter().take(limit).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payouts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn balance_of(&self, owner: BalanceOwner) -> u64 {
        self.payouts.balance_of(owner)
    }

    pub fn platform_revenue(&self) -> OwnerBalance {
        self.payouts.balance_report_for(BalanceOwner::Platform)
    }

    /// Ask the rail to pay out earnings.
    ///
    /// Teachers draw their own balance; admins draw the platform treasury.
    /// Students have no balance to draw.
    pub fn request_withdrawal(
        &self,
        session: &Session,
        amount: u64,
        destination: &str,
    ) -> Result<PendingWithdrawal, PlatformError> {
        let owner = match session.role {
            Role::Teacher => BalanceOwner::Teacher {
                teacher_id: session.user_id,
            },
            Role::Admin => BalanceOwner::Platform,
            Role::Student => return Err(DomainError::Unauthorized.into()),
        };

        let pending = self.payouts.request(WithdrawalRequest {
            owner,
            amount,
            destination: destination.to_string(),
            requested_by: session.user_id,
        })?;

        Ok(pending)
    }

    /// Finish an accepted withdrawal and refresh the owner's display
    /// snapshot from the moved ledger. A failed settlement leaves both
    /// untouched.
    pub fn settle_withdrawal(
        &self,
        pending: PendingWithdrawal,
    ) -> Result<Transaction, PlatformError> {
        let owner = pending.owner();
        let tx = self.payouts.settle(pending)?;

        if let BalanceOwner::Teacher { teacher_id } = owner {
            self.accounts
                .record_balance_snapshot(teacher_id, self.payouts.balance_of(owner))?;
        }

        Ok(tx)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────────────────────

    pub fn pending_teachers(&self) -> Vec<User> {
        self.accounts.pending_approval()
    }

    pub fn approve_teacher(&self, acting: &Session, id: UserId) -> Result<User, PlatformError> {
        Ok(self.accounts.approve(acting.role, id)?)
    }

    pub fn lock_user(&self, acting: &Session, id: UserId) -> Result<User, PlatformError> {
        Ok(self.accounts.lock(acting.role, id)?)
    }

    pub fn unlock_user(&self, acting: &Session, id: UserId) -> Result<User, PlatformError> {
        Ok(self.accounts.unlock(acting.role, id)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tutor
    // ─────────────────────────────────────────────────────────────────────────

    pub fn ask_tutor(&self, question: &str, subject_context: &str) -> String {
        self.tutor.ask(question, subject_context)
    }

    pub fn summarize_lesson(&self, title: &str, transcript: &str) -> Vec<String> {
        self.tutor.summarize_lesson(title, transcript)
    }
}

impl core::fmt::Debug for Platform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Platform")
            .field("accounts", &self.accounts)
            .field("catalog", &self.catalog)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}
