/// Ordered instruction list for one swap, including WSOL wrapping and
/// destination account creation.
use super::instructions::SwapInstruction;
use super::types::SwapQuote;
use crate::constants::{is_wsol_mint, TOKEN_ACCOUNT_SIZE, WSOL_MINT};
use crate::errors::{SwapError, SwapResult};
use crate::pools::{Direction, PoolRecord};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

/// Instructions plus any keypairs beyond the owner that must sign them
pub struct BuiltSwap {
    pub instructions: Vec<SwapInstruction>,
    pub extra_signers: Vec<Keypair>,
}

impl BuiltSwap {
    pub fn to_instructions(&self) -> SwapResult<Vec<Instruction>> {
        self.instructions
            .iter()
            .map(SwapInstruction::to_instruction)
            .collect()
    }

    /// Temporary WSOL account, when one is created
    pub fn wrap_account(&self) -> Option<Pubkey> {
        self.extra_signers.first().map(|k| k.pubkey())
    }
}

/// Build the swap. `wrap_rent` is the rent-exempt minimum for a token account
/// and is only used when one side of the pool is WSOL.
pub fn build_swap(
    pool: &PoolRecord,
    direction: Direction,
    quote: &SwapQuote,
    owner: &Pubkey,
    wrap_rent: u64,
) -> SwapResult<BuiltSwap> {
    if quote.source_missing && quote.destination_missing {
        return Err(SwapError::BothAccountsMissing);
    }

    let amount_in = quote.amount_in();
    let (mint_in, mint_out) = pool.mints_for(direction);

    let mut instructions = Vec::with_capacity(5);
    let mut extra_signers = Vec::new();
    let mut source = quote.source.address;
    let mut destination = quote.destination.address;

    let needs_wrap = is_wsol_mint(&pool.base_mint) || is_wsol_mint(&pool.quote_mint);
    if needs_wrap {
        let temp = Keypair::new();
        let temp_key = temp.pubkey();

        let lamports = if is_wsol_mint(&mint_in) {
            wrap_rent.saturating_add(amount_in)
        } else {
            wrap_rent
        };

        instructions.push(SwapInstruction::CreateAccount {
            payer: *owner,
            account: temp_key,
            lamports,
            space: TOKEN_ACCOUNT_SIZE as u64,
            program: spl_token::id(),
        });
        instructions.push(SwapInstruction::InitializeAccount {
            account: temp_key,
            mint: WSOL_MINT,
            owner: *owner,
        });

        if is_wsol_mint(&mint_in) {
            source = temp_key;
        }
        if is_wsol_mint(&mint_out) {
            destination = temp_key;
        }
        extra_signers.push(temp);
    }

    // A missing WSOL side already goes through the temporary account
    let missing_mint = if quote.source_missing {
        Some(mint_in)
    } else if quote.destination_missing {
        Some(mint_out)
    } else {
        None
    };
    if let Some(mint) = missing_mint.filter(|mint| !is_wsol_mint(mint)) {
        instructions.push(SwapInstruction::CreateAssociatedAccount {
            payer: *owner,
            wallet: *owner,
            mint,
        });
    }

    instructions.push(SwapInstruction::RaydiumSwap {
        pool: Box::new(pool.clone()),
        amount_in,
        min_out: quote.min_out,
        source,
        destination,
        owner: *owner,
    });

    if let Some(temp) = extra_signers.first() {
        instructions.push(SwapInstruction::CloseAccount {
            account: temp.pubkey(),
            destination: *owner,
            owner: *owner,
        });
    }

    Ok(BuiltSwap {
        instructions,
        extra_signers,
    })
}
