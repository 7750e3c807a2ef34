#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Reward Token — Fee-on-Transfer with Periodic Holder Rewards
///
/// **Role:** fungible ledger, transfer tax collector, holder registry,
/// and timed proportional reward distributor.
///
/// ```text
/// TRANSFER ROUTING (tax 5%, liquidity 2% by default):
///   sender ──┬── tax      → contract (accrues until sweep threshold)
///            ├── liquidity → liquidity wallet
///            └── remainder → recipient (recorded as holder)
///
/// SWEEP (accrued tax ≥ minimum_tax_threshold):
///   accrued tokens → tax wallet
///   entire native balance → rewards wallet
///
/// DISTRIBUTION (once per interval, pool > 0):
///   70% of native pool split across holders pro rata to token balance;
///   30% plus all floor dust stays in the pool for the next cycle.
/// ```
///
/// Every mutating message either completes fully or returns `Err`, which
/// reverts all state changes of the call on-chain. The sweep and the
/// distribution loop share a single reentrancy lock.
#[ink::contract]
mod reward_token {
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Denominator for all percentage calculations.
    pub const PERCENT_DENOMINATOR: u128 = 100;

    /// Share of the native reward pool paid out per distribution cycle (70%).
    /// The untouched 30% remains in the pool and seeds the next cycle.
    pub const DISTRIBUTION_PERCENT: u128 = 70;

    /// Default transfer tax rate in percent.
    pub const DEFAULT_TAX_RATE: u128 = 5;

    /// Default liquidity carve-out rate in percent.
    pub const DEFAULT_LIQUIDITY_RATE: u128 = 2;

    /// Default accrued-fee balance that triggers a sweep.
    pub const DEFAULT_SWEEP_THRESHOLD: Balance = 1_000;

    /// Distribution interval bounds in seconds (4 h – 12 h).
    pub const MIN_DISTRIBUTION_INTERVAL_SECS: u64 = 14_400;
    pub const MAX_DISTRIBUTION_INTERVAL_SECS: u64 = 43_200;

    /// Block timestamps are milliseconds; intervals are configured in seconds.
    pub const MS_PER_SEC: u64 = 1_000;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct RewardToken {
        // ── Ledger ────────────────────────────────────────────────────────
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,

        // ── Access control ────────────────────────────────────────────────
        owner: AccountId,

        // ── Fee routing ───────────────────────────────────────────────────
        tax_wallet: AccountId,
        liquidity_wallet: AccountId,
        rewards_wallet: AccountId,
        tax_rate: u128,
        liquidity_rate: u128,
        minimum_tax_threshold: Balance,

        // ── Holder registry ───────────────────────────────────────────────
        /// Every address ever credited by `transfer`, in insertion order.
        /// Entries are never removed, even when the balance drops to zero.
        holders: Vec<AccountId>,
        known_holder: Mapping<AccountId, bool>,
        excluded_from_rewards: Mapping<AccountId, bool>,

        // ── Distribution engine ───────────────────────────────────────────
        distribution_interval_secs: u64,
        last_distribution_time: Timestamp,
        /// Shared by the sweep and the distribution loop; set for the
        /// duration of either call and cleared on every exit path.
        reentrancy_lock: bool,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: AccountId,
        #[ink(topic)]
        to: AccountId,
        value: Balance,
        tax: Balance,
        liquidity: Balance,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        to: AccountId,
        amount: Balance,
        new_total_supply: Balance,
    }

    #[ink(event)]
    pub struct FeesSwept {
        tax_amount: Balance,
        pool_forwarded: Balance,
        timestamp: Timestamp,
    }

    #[ink(event)]
    pub struct RewardsDistributed {
        amount: Balance,
        timestamp: Timestamp,
    }

    #[ink(event)]
    pub struct RewardExclusionChanged {
        #[ink(topic)]
        account: AccountId,
        excluded: bool,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Owner-gated message called by a non-owner.
        PermissionDenied,
        /// Configuration value outside its allowed range.
        ValidationError,
        /// `distribute_rewards` called before the interval elapsed.
        IntervalNotElapsed,
        /// The native reward pool is empty.
        NothingToDistribute,
        /// A recipient rejected or could not accept a native payment
        /// during distribution or sweep.
        HolderPaymentFailed,
        /// Ledger transfer exceeds the sender's balance.
        InsufficientBalance,
        /// Nested entry into a guarded operation.
        ReentrantCall,
        /// Checked arithmetic failed.
        MathsError,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl RewardToken {
        /// Deploys with zero supply; use `mint` to seed balances. Payable so
        /// the native reward pool can be funded at deployment.
        #[ink(constructor, payable)]
        pub fn new(
            tax_wallet: AccountId,
            liquidity_wallet: AccountId,
            rewards_wallet: AccountId,
        ) -> Self {
            Self {
                total_supply: 0,
                balances: Mapping::default(),
                owner: Self::env().caller(),
                tax_wallet,
                liquidity_wallet,
                rewards_wallet,
                tax_rate: DEFAULT_TAX_RATE,
                liquidity_rate: DEFAULT_LIQUIDITY_RATE,
                minimum_tax_threshold: DEFAULT_SWEEP_THRESHOLD,
                holders: Vec::new(),
                known_holder: Mapping::default(),
                excluded_from_rewards: Mapping::default(),
                distribution_interval_secs: MIN_DISTRIBUTION_INTERVAL_SECS,
                last_distribution_time: Self::env().block_timestamp(),
                reentrancy_lock: false,
            }
        }

        // =================================================================
        // TRANSFER — FEE SPLIT, REGISTRY UPDATE, CONDITIONAL SWEEP
        // =================================================================

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            let from = self.env().caller();

            let tax_amount = amount
                .checked_mul(self.tax_rate)
                .ok_or(Error::MathsError)?
                / PERCENT_DENOMINATOR;
            let liquidity_amount = amount
                .checked_mul(self.liquidity_rate)
                .ok_or(Error::MathsError)?
                / PERCENT_DENOMINATOR;
            let transfer_amount = amount
                .checked_sub(tax_amount)
                .and_then(|r| r.checked_sub(liquidity_amount))
                .ok_or(Error::MathsError)?;

            // Fixed sub-transfer order; each step re-checks the sender's
            // remaining balance. No deduplication when a fee wallet
            // coincides with sender or recipient.
            let contract = self.env().account_id();
            self.ledger_transfer(from, contract, tax_amount)?;
            self.ledger_transfer(from, self.liquidity_wallet, liquidity_amount)?;
            self.ledger_transfer(from, to, transfer_amount)?;

            self.record_holder(to);
            self.settle_accrued_fees()?;

            self.env().emit_event(Transfer {
                from,
                to,
                value: transfer_amount,
                tax: tax_amount,
                liquidity: liquidity_amount,
            });
            Ok(())
        }

        fn ledger_transfer(
            &mut self,
            from: AccountId,
            to: AccountId,
            amount: Balance,
        ) -> Result<(), Error> {
            let from_balance = self.balances.get(from).unwrap_or(0);
            if from_balance < amount {
                return Err(Error::InsufficientBalance);
            }
            self.balances.insert(from, &(from_balance - amount));
            let to_balance = self.balances.get(to).unwrap_or(0);
            self.balances.insert(
                to,
                &(to_balance.checked_add(amount).ok_or(Error::MathsError)?),
            );
            Ok(())
        }

        fn record_holder(&mut self, account: AccountId) {
            if self.known_holder.get(account).unwrap_or(false) {
                return;
            }
            self.known_holder.insert(account, &true);
            self.holders.push(account);
        }

        // =================================================================
        // REWARD POOL SWEEP
        // =================================================================

        /// Moves the full accrued tax balance to the tax wallet and forwards
        /// the entire native pool to the rewards wallet once the accrual
        /// crosses the threshold. A failed forward fails the enclosing
        /// transfer as a whole.
        fn settle_accrued_fees(&mut self) -> Result<(), Error> {
            let contract = self.env().account_id();
            let accrued = self.balances.get(contract).unwrap_or(0);
            if accrued < self.minimum_tax_threshold {
                return Ok(());
            }

            self.with_reentrancy_guard(|token| {
                let tax_wallet = token.tax_wallet;
                token.ledger_transfer(contract, tax_wallet, accrued)?;

                let pool = token.env().balance();
                token
                    .env()
                    .transfer(token.rewards_wallet, pool)
                    .map_err(|_| Error::HolderPaymentFailed)?;

                token.env().emit_event(FeesSwept {
                    tax_amount: accrued,
                    pool_forwarded: pool,
                    timestamp: token.env().block_timestamp(),
                });
                Ok(())
            })
        }

        // =================================================================
        // DISTRIBUTION ENGINE
        // =================================================================

        #[ink(message)]
        pub fn distribute_rewards(&mut self) -> Result<(), Error> {
            self.with_reentrancy_guard(Self::execute_distribution)
        }

        fn execute_distribution(&mut self) -> Result<(), Error> {
            let now = self.env().block_timestamp();
            let interval_ms = self
                .distribution_interval_secs
                .checked_mul(MS_PER_SEC)
                .ok_or(Error::MathsError)?;
            let due_at = self
                .last_distribution_time
                .checked_add(interval_ms)
                .ok_or(Error::MathsError)?;
            if now < due_at {
                return Err(Error::IntervalNotElapsed);
            }

            let pool = self.env().balance();
            if pool == 0 {
                return Err(Error::NothingToDistribute);
            }

            let amount_to_distribute = pool
                .checked_mul(DISTRIBUTION_PERCENT)
                .ok_or(Error::MathsError)?
                / PERCENT_DENOMINATOR;

            // Timer advances before any payment goes out. A payment failure
            // below returns `Err`, which reverts the whole call on-chain,
            // timer included.
            self.last_distribution_time = now;

            for i in 0..self.holders.len() {
                let holder = self.holders[i];
                if self.excluded_from_rewards.get(holder).unwrap_or(false) {
                    continue;
                }
                let held = self.balances.get(holder).unwrap_or(0);
                let share = amount_to_distribute
                    .checked_mul(held)
                    .ok_or(Error::MathsError)?
                    .checked_div(self.total_supply)
                    .ok_or(Error::MathsError)?;
                self.env()
                    .transfer(holder, share)
                    .map_err(|_| Error::HolderPaymentFailed)?;
            }

            self.env().emit_event(RewardsDistributed {
                amount: amount_to_distribute,
                timestamp: now,
            });
            Ok(())
        }

        /// Scoped acquisition of the shared lock: rejects nested entry,
        /// releases on success and on failure alike.
        fn with_reentrancy_guard<T>(
            &mut self,
            f: impl FnOnce(&mut Self) -> Result<T, Error>,
        ) -> Result<T, Error> {
            if self.reentrancy_lock {
                return Err(Error::ReentrantCall);
            }
            self.reentrancy_lock = true;
            let result = f(self);
            self.reentrancy_lock = false;
            result
        }

        // =================================================================
        // SUPPLY & POOL DEPOSITS
        // =================================================================

        #[ink(message)]
        pub fn mint(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.ensure_owner()?;
            let to_balance = self.balances.get(to).unwrap_or(0);
            self.balances.insert(
                to,
                &(to_balance.checked_add(amount).ok_or(Error::MathsError)?),
            );
            self.total_supply = self
                .total_supply
                .checked_add(amount)
                .ok_or(Error::MathsError)?;
            self.env().emit_event(Minted {
                to,
                amount,
                new_total_supply: self.total_supply,
            });
            Ok(())
        }

        /// Accepts native deposits into the reward pool. The transferred
        /// value raises the contract's own balance; nothing else to record.
        #[ink(message, payable)]
        pub fn deposit_rewards(&mut self) {}

        // =================================================================
        // ADMIN FUNCTIONS
        // =================================================================

        #[ink(message)]
        pub fn set_tax_rate(&mut self, rate: u128) -> Result<(), Error> {
            self.ensure_owner()?;
            if rate.saturating_add(self.liquidity_rate) > PERCENT_DENOMINATOR {
                return Err(Error::ValidationError);
            }
            self.tax_rate = rate;
            Ok(())
        }

        #[ink(message)]
        pub fn set_liquidity_rate(&mut self, rate: u128) -> Result<(), Error> {
            self.ensure_owner()?;
            if rate.saturating_add(self.tax_rate) > PERCENT_DENOMINATOR {
                return Err(Error::ValidationError);
            }
            self.liquidity_rate = rate;
            Ok(())
        }

        #[ink(message)]
        pub fn set_minimum_tax_threshold(&mut self, threshold: Balance) -> Result<(), Error> {
            self.ensure_owner()?;
            if threshold == 0 {
                return Err(Error::ValidationError);
            }
            self.minimum_tax_threshold = threshold;
            Ok(())
        }

        #[ink(message)]
        pub fn set_distribution_interval(&mut self, secs: u64) -> Result<(), Error> {
            self.ensure_owner()?;
            if !(MIN_DISTRIBUTION_INTERVAL_SECS..=MAX_DISTRIBUTION_INTERVAL_SECS).contains(&secs) {
                return Err(Error::ValidationError);
            }
            self.distribution_interval_secs = secs;
            Ok(())
        }

        #[ink(message)]
        pub fn set_excluded_from_rewards(
            &mut self,
            account: AccountId,
            excluded: bool,
        ) -> Result<(), Error> {
            self.ensure_owner()?;
            self.excluded_from_rewards.insert(account, &excluded);
            self.env()
                .emit_event(RewardExclusionChanged { account, excluded });
            Ok(())
        }

        #[ink(message)]
        pub fn set_included_in_rewards(
            &mut self,
            account: AccountId,
            included: bool,
        ) -> Result<(), Error> {
            self.ensure_owner()?;
            let excluded = !included;
            self.excluded_from_rewards.insert(account, &excluded);
            self.env()
                .emit_event(RewardExclusionChanged { account, excluded });
            Ok(())
        }

        fn ensure_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::PermissionDenied);
            }
            Ok(())
        }

        // =================================================================
        // VIEW FUNCTIONS
        // =================================================================

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, account: AccountId) -> Balance {
            self.balances.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn reward_pool_balance(&self) -> Balance {
            self.env().balance()
        }

        #[ink(message)]
        pub fn tax_rate(&self) -> u128 {
            self.tax_rate
        }

        #[ink(message)]
        pub fn liquidity_rate(&self) -> u128 {
            self.liquidity_rate
        }

        #[ink(message)]
        pub fn minimum_tax_threshold(&self) -> Balance {
            self.minimum_tax_threshold
        }

        #[ink(message)]
        pub fn distribution_interval(&self) -> u64 {
            self.distribution_interval_secs
        }

        #[ink(message)]
        pub fn last_distribution_time(&self) -> Timestamp {
            self.last_distribution_time
        }

        #[ink(message)]
        pub fn holder_count(&self) -> u32 {
            self.holders.len() as u32
        }

        #[ink(message)]
        pub fn is_holder(&self, account: AccountId) -> bool {
            self.known_holder.get(account).unwrap_or(false)
        }

        #[ink(message)]
        pub fn get_holders(&self) -> Vec<AccountId> {
            self.holders.clone()
        }

        #[ink(message)]
        pub fn is_excluded_from_rewards(&self, account: AccountId) -> bool {
            self.excluded_from_rewards.get(account).unwrap_or(false)
        }

        /// Returns (tax wallet, liquidity wallet, rewards wallet).
        #[ink(message)]
        pub fn get_fee_wallets(&self) -> (AccountId, AccountId, AccountId) {
            (self.tax_wallet, self.liquidity_wallet, self.rewards_wallet)
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
