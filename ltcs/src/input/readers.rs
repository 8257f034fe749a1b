//! Parsers for the EFM, reversibility, reaction and stoichiometry files

use std::path::Path;

use log::{debug, info};
use ltcs_core::validation::{parse_flux, parse_reversibility_flag, split_fields, split_names};
use ltcs_core::{BitVector, LoadOptions, LoadedMatrix, LtcsError, ReactionMasks, SignMatrixBuilder};

use super::TextFile;
use crate::{Error, Result};

/// Number of reactions in an EFM file: the field count of its first line
pub fn efm_reaction_count<P: AsRef<Path>>(path: P) -> Result<usize> {
    let file = TextFile::open(path)?;
    let count = file
        .lines()?
        .next()
        .map_or(0, |(_, line)| split_fields(line).count());
    Ok(count)
}

/// Stream an EFM file into a [`LoadedMatrix`]
///
/// Each non-blank line is one flux mode with one value per reaction of
/// `masks`. An empty file loads as a matrix without modes.
pub fn load_efms<P: AsRef<Path>>(
    path: P,
    masks: ReactionMasks,
    options: LoadOptions,
) -> Result<LoadedMatrix> {
    let file = TextFile::open(path)?;
    let reactions = masks.reaction_count();
    let mut builder = SignMatrixBuilder::new(masks, options)?;
    let mut values = Vec::with_capacity(reactions);

    for (number, line) in file.lines()? {
        values.clear();
        for token in split_fields(line) {
            let value = parse_flux(token).map_err(|_| {
                Error::parse(file.path(), number, format!("invalid flux value {token:?}"))
            })?;
            values.push(value);
        }
        builder.push_row(values.as_slice()).map_err(|e| match e {
            LtcsError::DimensionMismatch { expected, found } => Error::parse(
                file.path(),
                number,
                format!("expected {expected} values, found {found}"),
            ),
            other => Error::Core(other),
        })?;
    }

    let loaded = builder.finish()?;
    info!(
        "loaded {} EFMs, {} of {} reactions retained",
        loaded.mode_count(),
        loaded.retained_reactions().len(),
        loaded.reaction_count()
    );
    Ok(loaded)
}

/// Read a reversibility file of `0`/`1` flags
///
/// Every non-blank line must hold exactly `reactions` flags; the last one
/// wins.
pub fn read_reversibility<P: AsRef<Path>>(path: P, reactions: usize) -> Result<BitVector> {
    let file = TextFile::open(path)?;
    let mut mask = None;

    for (number, line) in file.lines()? {
        let mut current = BitVector::new(reactions);
        let mut count = 0;
        for token in split_fields(line) {
            let reversible = parse_reversibility_flag(token).map_err(|_| {
                Error::parse(file.path(), number, format!("invalid reversibility flag {token:?}"))
            })?;
            if count < reactions && reversible {
                current.set(count);
            }
            count += 1;
        }
        if count != reactions {
            return Err(Error::parse(
                file.path(),
                number,
                format!("expected {reactions} flags, found {count}"),
            ));
        }
        mask = Some(current);
    }

    let mask = mask.ok_or_else(|| Error::format(file.path(), "no reversibility flags"))?;
    debug!("{} of {} reactions reversible", mask.count_ones(), reactions);
    Ok(mask)
}

/// Read reaction names from the first line of a reaction file
pub fn read_reaction_names<P: AsRef<Path>>(path: P, reactions: usize) -> Result<Vec<String>> {
    let file = TextFile::open(path)?;
    let names: Vec<String> = file
        .lines()?
        .next()
        .map(|(_, line)| split_names(line).map(str::to_owned).collect())
        .unwrap_or_default();

    if names.len() != reactions {
        return Err(Error::format(
            file.path(),
            format!(
                "{} reactions named, but the EFM file has {reactions}",
                names.len()
            ),
        ));
    }
    Ok(names)
}

/// Find the exchange reactions of a stoichiometric matrix
///
/// Rows are metabolites and columns reactions. A reaction is an exchange
/// reaction when its column holds only positive or only negative
/// coefficients beyond `zero_threshold`.
pub fn read_exchange_mask<P: AsRef<Path>>(
    path: P,
    reactions: usize,
    zero_threshold: f64,
) -> Result<BitVector> {
    let file = TextFile::open(path)?;
    let mut positive = BitVector::new(reactions);
    let mut negative = BitVector::new(reactions);
    let mut columns = None;

    for (number, line) in file.lines()? {
        let mut count = 0;
        for token in split_fields(line) {
            let value = parse_flux(token).map_err(|_| {
                Error::parse(file.path(), number, format!("invalid coefficient {token:?}"))
            })?;
            if count < reactions {
                if value > zero_threshold {
                    positive.set(count);
                } else if value < -zero_threshold {
                    negative.set(count);
                }
            }
            count += 1;
        }
        match columns {
            None => columns = Some(count),
            Some(expected) if expected != count => {
                return Err(Error::parse(
                    file.path(),
                    number,
                    format!("expected {expected} columns, found {count}"),
                ));
            }
            Some(_) => {}
        }
    }

    let columns = columns.unwrap_or(0);
    if columns != reactions {
        return Err(Error::format(
            file.path(),
            format!("{columns} reactions in stoichiometric matrix, but the EFM file has {reactions}"),
        ));
    }

    let mut exchange = BitVector::new(reactions);
    for reaction in 0..reactions {
        if positive.test(reaction) != negative.test(reaction) {
            exchange.set(reaction);
        }
    }
    debug!("{} exchange reactions", exchange.count_ones());
    Ok(exchange)
}
