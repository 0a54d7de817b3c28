//! One-way term matching
//!
//! `unify(pattern, data)` binds a pattern against a concrete term and returns
//! a fresh bound copy. It never backtracks and never binds two unknowns to
//! each other.
//!
//! Known limitation: a variable that occurs more than once in a pattern is
//! not constrained to bind the same value at each occurrence. `f(X, X)`
//! matches `f(1, 2)`. Each occurrence is matched on its own.

use super::Term;

/// Match `pattern` against `data`, returning the bound result on success.
///
/// - A variable on either side matches anything that is not `Null`. A
///   variable pattern yields a copy of `data`; variable data yields a copy
///   of `pattern`.
/// - `Null` patterns never match.
/// - Leaves match leaves of the same kind with equal values.
/// - Compounds need the same functor and arity, then every argument pair
///   must match (last argument first). The result carries the bound
///   arguments.
pub fn unify(pattern: &Term, data: &Term) -> Option<Term> {
    if data.is_var() && !pattern.is_null() {
        return Some(pattern.clone());
    }

    match (pattern, data) {
        (Term::Null, _) => None,
        (Term::Var(_), d) if !d.is_null() => Some(d.clone()),
        (Term::Var(_), _) => None,
        (Term::EmptyList, Term::EmptyList) => Some(data.clone()),
        (Term::Int(a), Term::Int(b)) if a == b => Some(data.clone()),
        (Term::Real(a), Term::Real(b)) if a == b => Some(data.clone()),
        (Term::Atom(a), Term::Atom(b)) if a == b => Some(data.clone()),
        (
            Term::Compound { functor: pf, args: pargs },
            Term::Compound { functor: df, args: dargs },
        ) if pargs.len() == dargs.len() && pf == df => {
            let mut bound = dargs.clone();
            for i in (0..pargs.len()).rev() {
                bound[i] = unify(&pargs[i], &dargs[i])?;
            }
            Some(Term::Compound {
                functor: df.clone(),
                args: bound,
            })
        }
        _ => None,
    }
}

/// Check that two terms match without keeping the binding
pub fn matches(pattern: &Term, data: &Term) -> bool {
    unify(pattern, data).is_some()
}

// ============================================================================
// TESTS
// ============================================================================
