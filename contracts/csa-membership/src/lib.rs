//! # CSA Membership Contract
//!
//! On-chain ledger for a Community Supported Agriculture program. The
//! operator opens time-boxed seasons with a fixed membership price, a
//! capacity cap, and a duration in weeks; buyers pay the season price to
//! mint a transferable membership share, and share holders redeem one box
//! per season week. The operator can close sales early and withdraw the
//! accumulated proceeds.

#![no_std]
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, String, Vec};

pub mod events;
pub mod share_token;


/// Seconds in one season week.
pub const SECONDS_PER_WEEK: u64 = 7 * 24 * 60 * 60;

/// Storage keys for the membership ledger.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract administrator (the program operator).
    Admin,
    /// Token contract used for membership payments.
    PaymentToken,
    /// Number of seasons created so far.
    SeasonCount,
    /// Season record by id.
    Season(u32),
    /// Season a membership share belongs to.
    TokenSeason(u64),
    /// Whether (token id, week) has already been redeemed.
    Redemption(u64, u32),
}

/// A time-boxed membership offering.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Season {
    pub id: u32,
    pub name: String,
    /// Price of one membership in payment-token smallest units.
    pub membership_price: i128,
    /// Capacity cap for this season.
    pub total_memberships: u32,
    pub memberships_sold: u32,
    /// Ledger timestamp captured at creation.
    pub start_time: u64,
    pub duration_weeks: u32,
    pub is_open_for_sale: bool,
}

#[contract]
pub struct CsaMembershipContract;

#[contractimpl]
impl CsaMembershipContract {
    // ── Initialization ──────────────────────────────────────────────

    /// One-time contract initialization. Sets the operator address and the
    /// token used for membership payments.
    ///
    /// Must be called before any other entry point. The caller must
    /// authorize as `admin`.
    pub fn initialize(env: Env, admin: Address, payment_token: Address) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("already initialized");
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage().instance().set(&DataKey::SeasonCount, &0u32);
    }

    // ── Season management ───────────────────────────────────────────

    /// Open a new season for sale. Only the admin can create seasons.
    ///
    /// The season starts at the current ledger timestamp and runs for
    /// `duration_weeks` weeks. Purchases always target the newest season,
    /// so creating one supersedes the previous season's sales.
    ///
    /// Returns the new season id.
    pub fn create_new_season(
        env: Env,
        caller: Address,
        name: String,
        membership_price: i128,
        total_memberships: u32,
        duration_weeks: u32,
    ) -> u32 {
        Self::require_admin(&env, &caller);
        assert!(
            membership_price >= 0,
            "membership_price must be non-negative"
        );

        let id: u32 = env
            .storage()
            .instance()
            .get(&DataKey::SeasonCount)
            .unwrap_or(0);
        let season = Season {
            id,
            name,
            membership_price,
            total_memberships,
            memberships_sold: 0,
            start_time: env.ledger().timestamp(),
            duration_weeks,
            is_open_for_sale: true,
        };
        env.storage().instance().set(&DataKey::Season(id), &season);
        env.storage().instance().set(&DataKey::SeasonCount, &(id + 1));

        events::emit_season_created(&env, &season, &caller);
        id
    }

    /// Close sales for a season. Only the admin can close sales.
    ///
    /// Closing an already-closed season succeeds and leaves it closed.
    pub fn close_season_sales(env: Env, caller: Address, season_id: u32) {
        Self::require_admin(&env, &caller);
        let mut season = Self::load_season(&env, season_id);
        season.is_open_for_sale = false;
        env.storage()
            .instance()
            .set(&DataKey::Season(season_id), &season);
        events::emit_sales_closed(&env, season_id, &caller);
    }

    // ── Purchase ────────────────────────────────────────────────────

    /// Buy one membership in the most recently created season.
    ///
    /// `payment` must equal the season's membership price exactly; the
    /// amount is transferred from the buyer to the contract and a new
    /// membership share is minted to the buyer.
    ///
    /// Returns the minted share's token id.
    pub fn buy_membership(env: Env, buyer: Address, payment: i128) -> u64 {
        buyer.require_auth();

        let count: u32 = env
            .storage()
            .instance()
            .get(&DataKey::SeasonCount)
            .unwrap_or(0);
        assert!(count > 0, "no seasons have been created");
        let season_id = count - 1;
        let mut season = Self::load_season(&env, season_id);

        assert!(
            payment == season.membership_price,
            "incorrect payment amount"
        );
        assert!(season.is_open_for_sale, "sales are closed for this season");
        assert!(
            season.memberships_sold < season.total_memberships,
            "all memberships have been sold"
        );

        let token_client = token::Client::new(&env, &Self::payment_token(&env));
        token_client.transfer(&buyer, &env.current_contract_address(), &payment);

        let token_id = share_token::mint(&env, &buyer);
        env.storage()
            .instance()
            .set(&DataKey::TokenSeason(token_id), &season_id);

        season.memberships_sold += 1;
        env.storage()
            .instance()
            .set(&DataKey::Season(season_id), &season);

        events::emit_membership_minted(&env, token_id, season_id, &buyer);
        token_id
    }

    // ── Redemption ──────────────────────────────────────────────────

    /// Redeem the weekly box for a membership share.
    ///
    /// The caller must currently own the share, the share's season must
    /// still be running, and each share redeems at most once per week.
    pub fn redeem_weekly_box(env: Env, caller: Address, token_id: u64) {
        caller.require_auth();

        let owner = share_token::owner_of(&env, token_id);
        assert!(owner == caller, "caller is not the token owner");

        let season_id: u32 = env
            .storage()
            .instance()
            .get(&DataKey::TokenSeason(token_id))
            .expect("token not found");
        let season = Self::load_season(&env, season_id);
        let week = Self::week_of(&env, &season);
        assert!(week < season.duration_weeks, "outside of the season period");

        let key = DataKey::Redemption(token_id, week);
        assert!(
            !env.storage().instance().has(&key),
            "box already redeemed for this week"
        );
        env.storage().instance().set(&key, &true);

        events::emit_box_redeemed(&env, token_id, week);
    }

    /// Whether a share has already redeemed its box for a given week.
    pub fn has_redeemed(env: Env, token_id: u64, week: u32) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Redemption(token_id, week))
            .unwrap_or(false)
    }

    // ── Funds ───────────────────────────────────────────────────────

    /// Withdraw the contract's entire payment-token balance to the admin.
    ///
    /// Returns the amount transferred.
    pub fn withdraw(env: Env, caller: Address) -> i128 {
        Self::require_admin(&env, &caller);
        let token_client = token::Client::new(&env, &Self::payment_token(&env));
        let contract = env.current_contract_address();
        let amount = token_client.balance(&contract);
        token_client.transfer(&contract, &caller, &amount);
        events::emit_funds_withdrawn(&env, amount, &caller);
        amount
    }

    /// Hand the admin role to a new address. Only the current admin can
    /// transfer it; afterwards the previous admin holds no privileges.
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) {
        Self::require_admin(&env, &caller);
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        events::emit_admin_transferred(&env, &caller, &new_admin);
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Get a season record by id.
    pub fn get_season(env: Env, season_id: u32) -> Season {
        Self::load_season(&env, season_id)
    }

    /// Number of seasons created so far.
    pub fn season_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::SeasonCount)
            .unwrap_or(0)
    }

    /// Current week index of a season: 0 at or before the season start,
    /// then one increment per whole elapsed week.
    pub fn get_current_week(env: Env, season_id: u32) -> u32 {
        let season = Self::load_season(&env, season_id);
        Self::week_of(&env, &season)
    }

    /// Season a membership share belongs to.
    pub fn token_season(env: Env, token_id: u64) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::TokenSeason(token_id))
            .expect("token not found")
    }

    /// Get the contract admin address.
    pub fn get_admin(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("not initialized")
    }

    /// Get the payment token contract address.
    pub fn get_payment_token(env: Env) -> Address {
        Self::payment_token(&env)
    }

    // ── Share token surface ─────────────────────────────────────────

    /// Owner of a membership share.
    pub fn owner_of(env: Env, token_id: u64) -> Address {
        share_token::owner_of(&env, token_id)
    }

    /// Number of membership shares held by an address.
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        share_token::balance_of(&env, &owner)
    }

    /// Transfer a membership share to another address.
    ///
    /// The current owner must authorize. Redemption history is keyed by
    /// token id and moves with the share.
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) {
        from.require_auth();
        share_token::transfer(&env, &from, &to, token_id);
        events::emit_share_transferred(&env, token_id, &from, &to);
    }

    /// All share ids held by an address, in acquisition order.
    pub fn tokens_of_owner(env: Env, owner: Address) -> Vec<u64> {
        share_token::tokens_of(&env, &owner)
    }

    /// Share id at `index` in an owner's holdings.
    pub fn token_of_owner_by_index(env: Env, owner: Address, index: u32) -> u64 {
        share_token::token_of_owner_by_index(&env, &owner, index)
    }

    /// Total number of shares minted across all seasons.
    pub fn total_minted(env: Env) -> u64 {
        share_token::total_minted(&env)
    }

    /// Collection name.
    pub fn name(env: Env) -> String {
        String::from_str(&env, share_token::TOKEN_NAME)
    }

    /// Collection symbol.
    pub fn symbol(env: Env) -> String {
        String::from_str(&env, share_token::TOKEN_SYMBOL)
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// Require the caller to be the admin.
    fn require_admin(env: &Env, caller: &Address) {
        caller.require_auth();
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("not initialized");
        assert!(*caller == admin, "caller is not admin");
    }

    /// Load a season record or panic.
    fn load_season(env: &Env, season_id: u32) -> Season {
        env.storage()
            .instance()
            .get(&DataKey::Season(season_id))
            .expect("season not found")
    }

    fn payment_token(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .expect("not initialized")
    }

    /// Week index for a season at the current ledger time. Floors at 0 for
    /// any time at or before the season start.
    fn week_of(env: &Env, season: &Season) -> u32 {
        let now = env.ledger().timestamp();
        if now <= season.start_time {
            return 0;
        }
        ((now - season.start_time) / SECONDS_PER_WEEK) as u32
    }
}
