use std::cell::Ref;

use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::SWITCHBOARD_PROGRAM_ID;
use crate::error::ErrorCode;
use crate::state::RandomnessRequest;

/// What a Switchboard randomness account says about a request at fulfillment time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealedRandomness {
    pub request: RandomnessRequest,
    pub reveal_slot: u64,
    /// `None` until the oracle has revealed in the current slot.
    pub value: Option<[u8; 32]>,
}

/// Borrows the randomness data of an account owned by the Switchboard program.
fn load<'a>(account: &'a AccountInfo) -> Result<Ref<'a, RandomnessAccountData>> {
    if *account.owner != SWITCHBOARD_PROGRAM_ID {
        msg!("Randomness account owner: {}", account.owner);
        return err!(ErrorCode::InvalidRandomnessAccount);
    }
    require!(
        account.data_len() >= RandomnessAccountData::size(),
        ErrorCode::InvalidRandomnessAccount
    );

    RandomnessAccountData::parse(account.data.borrow())
        .map_err(|_| error!(ErrorCode::InvalidRandomnessAccount))
}

/// Reads a freshly committed randomness account and turns it into a request.
///
/// The commit must come from `oracle_queue` and be seeded from the previous
/// slot, so nobody can know the value yet.
pub fn read_commitment(
    account: &AccountInfo,
    oracle_queue: &Pubkey,
    clock: &Clock,
) -> Result<RandomnessRequest> {
    let randomness_data = load(account)?;

    let queue = Pubkey::new_from_array(randomness_data.queue.to_bytes());
    if queue != *oracle_queue {
        msg!("Randomness queue {} does not match {}", queue, oracle_queue);
        return err!(ErrorCode::InvalidRandomnessAccount);
    }
    if randomness_data.seed_slot != clock.slot.saturating_sub(1) {
        msg!("Seed slot: {}", randomness_data.seed_slot);
        msg!("Current slot: {}", clock.slot);
        return err!(ErrorCode::RandomnessAlreadyRevealed);
    }

    Ok(RandomnessRequest {
        account: account.key(),
        seed_slot: randomness_data.seed_slot,
    })
}

pub fn read_reveal(account: &AccountInfo, clock: &Clock) -> Result<RevealedRandomness> {
    let randomness_data = load(account)?;

    Ok(RevealedRandomness {
        request: RandomnessRequest {
            account: account.key(),
            seed_slot: randomness_data.seed_slot,
        },
        reveal_slot: randomness_data.reveal_slot,
        value: randomness_data.get_value(clock).ok(),
    })
}

/// Reduces a 256-bit little-endian random value modulo `players`.
///
/// Plain modulo: the bias for non power-of-two counts is negligible against
/// a 2^256 domain and is accepted.
pub fn winner_index(value: &[u8; 32], players: usize) -> Option<usize> {
    if players == 0 {
        return None;
    }
    let modulus = players as u128;
    let index = value
        .iter()
        .rev()
        .fold(0u128, |acc, byte| ((acc << 8) | u128::from(*byte)) % modulus);
    Some(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use proptest::prelude::*;
    use switchboard_on_demand::Discriminator;

    // Field offsets inside a serialized `RandomnessAccountData`.
    const QUEUE: usize = 40;
    const SEED_SLOT: usize = 104;
    const REVEAL_SLOT: usize = 144;
    const VALUE: usize = 152;

    fn low_bytes(low: u64) -> [u8; 32] {
        let mut value = [0u8; 32];
        value[..8].copy_from_slice(&low.to_le_bytes());
        value
    }

    fn code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(e) => panic!("unexpected program error: {:?}", e),
        }
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: ErrorCode) {
        let err = result.expect_err("call should fail");
        assert_eq!(code(err), u32::from(expected));
    }

    fn randomness_data(
        queue: &Pubkey,
        seed_slot: u64,
        reveal_slot: u64,
        value: [u8; 32],
    ) -> Vec<u8> {
        let mut data = vec![0u8; RandomnessAccountData::size()];
        data[..8].copy_from_slice(&<RandomnessAccountData as Discriminator>::DISCRIMINATOR);
        data[QUEUE..QUEUE + 32].copy_from_slice(queue.as_ref());
        data[SEED_SLOT..SEED_SLOT + 8].copy_from_slice(&seed_slot.to_le_bytes());
        data[REVEAL_SLOT..REVEAL_SLOT + 8].copy_from_slice(&reveal_slot.to_le_bytes());
        data[VALUE..VALUE + 32].copy_from_slice(&value);
        data
    }

    fn at_slot(slot: u64) -> Clock {
        Clock {
            slot,
            ..Clock::default()
        }
    }

    struct Fixture {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl Fixture {
        fn new(owner: Pubkey, data: Vec<u8>) -> Self {
            Self {
                key: Pubkey::new_unique(),
                owner,
                lamports: 1_000_000,
                data,
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                false,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn commitment_from_previous_slot_is_accepted() {
        let queue = Pubkey::new_unique();
        let data = randomness_data(&queue, 99, 0, [0; 32]);
        let mut fixture = Fixture::new(SWITCHBOARD_PROGRAM_ID, data);
        let key = fixture.key;

        let request = read_commitment(&fixture.info(), &queue, &at_slot(100)).unwrap();
        assert_eq!(request, RandomnessRequest { account: key, seed_slot: 99 });
    }

    #[test]
    fn account_not_owned_by_switchboard_is_rejected() {
        let queue = Pubkey::new_unique();
        let data = randomness_data(&queue, 99, 102, [3; 32]);
        let mut fixture = Fixture::new(Pubkey::new_unique(), data);

        assert_err(
            read_commitment(&fixture.info(), &queue, &at_slot(100)),
            ErrorCode::InvalidRandomnessAccount,
        );
        assert_err(
            read_reveal(&fixture.info(), &at_slot(102)),
            ErrorCode::InvalidRandomnessAccount,
        );
    }

    #[test]
    fn commitment_from_other_queue_is_rejected() {
        let data = randomness_data(&Pubkey::new_unique(), 99, 0, [0; 32]);
        let mut fixture = Fixture::new(SWITCHBOARD_PROGRAM_ID, data);

        assert_err(
            read_commitment(&fixture.info(), &Pubkey::new_unique(), &at_slot(100)),
            ErrorCode::InvalidRandomnessAccount,
        );
    }

    #[test]
    fn stale_commitment_is_rejected() {
        let queue = Pubkey::new_unique();
        let data = randomness_data(&queue, 90, 0, [0; 32]);
        let mut fixture = Fixture::new(SWITCHBOARD_PROGRAM_ID, data);

        assert_err(
            read_commitment(&fixture.info(), &queue, &at_slot(100)),
            ErrorCode::RandomnessAlreadyRevealed,
        );
    }

    #[test]
    fn unparsable_data_is_rejected() {
        let queue = Pubkey::new_unique();
        let mut wrong_discriminator = randomness_data(&queue, 99, 0, [0; 32]);
        wrong_discriminator[0] ^= 0xFF;
        let mut fixture = Fixture::new(SWITCHBOARD_PROGRAM_ID, wrong_discriminator);
        assert_err(
            read_commitment(&fixture.info(), &queue, &at_slot(100)),
            ErrorCode::InvalidRandomnessAccount,
        );

        let mut truncated = randomness_data(&queue, 99, 0, [0; 32]);
        truncated.truncate(64);
        let mut fixture = Fixture::new(SWITCHBOARD_PROGRAM_ID, truncated);
        assert_err(
            read_reveal(&fixture.info(), &at_slot(100)),
            ErrorCode::InvalidRandomnessAccount,
        );
    }

    #[test]
    fn reveal_value_only_in_reveal_slot() {
        let queue = Pubkey::new_unique();
        let data = randomness_data(&queue, 99, 102, [3; 32]);
        let mut fixture = Fixture::new(SWITCHBOARD_PROGRAM_ID, data);
        let key = fixture.key;

        let fresh = read_reveal(&fixture.info(), &at_slot(102)).unwrap();
        assert_eq!(fresh.request, RandomnessRequest { account: key, seed_slot: 99 });
        assert_eq!(fresh.reveal_slot, 102);
        assert_eq!(fresh.value, Some([3; 32]));

        let late = read_reveal(&fixture.info(), &at_slot(103)).unwrap();
        assert_eq!(late.value, None);
    }

    #[test]
    fn no_players_has_no_winner() {
        assert_eq!(winner_index(&[0xFF; 32], 0), None);
    }

    #[test]
    fn single_player_always_wins() {
        assert_eq!(winner_index(&low_bytes(7), 1), Some(0));
        assert_eq!(winner_index(&[0xFF; 32], 1), Some(0));
    }

    #[test]
    fn ten_over_four_players_is_two() {
        assert_eq!(winner_index(&low_bytes(10), 4), Some(2));
    }

    #[test]
    fn high_bytes_take_part_in_reduction() {
        // 2^64 mod 3 == 1
        let mut value = [0u8; 32];
        value[8] = 1;
        assert_eq!(winner_index(&value, 3), Some(1));

        // 2^256 - 1 mod 5 == 0
        assert_eq!(winner_index(&[0xFF; 32], 5), Some(0));
    }

    proptest! {
        #[test]
        fn index_is_in_range(value in any::<[u8; 32]>(), players in 1usize..=10_000) {
            let index = winner_index(&value, players).unwrap();
            prop_assert!(index < players);
        }

        #[test]
        fn matches_u64_modulo_for_small_values(low in any::<u64>(), players in 1usize..=10_000) {
            let index = winner_index(&low_bytes(low), players).unwrap();
            prop_assert_eq!(index as u64, low % players as u64);
        }

        #[test]
        fn deterministic(value in any::<[u8; 32]>(), players in 1usize..=100) {
            prop_assert_eq!(winner_index(&value, players), winner_index(&value, players));
        }
    }
}
