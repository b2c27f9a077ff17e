//! Boolean encoders over binary operands.
//!
//! Each operator returns a binary auxiliary `z` whose constraints admit
//! exactly one `z` at every vertex of the unit square:
//!
//! | op  | constraints                                             |
//! |-----|---------------------------------------------------------|
//! | and | `x + y - 1 <= z`, `x >= z`, `y >= z`                    |
//! | or  | `x + y >= z`, `x <= z`, `y <= z`                        |
//! | xor | `x + y >= z`, `x - y <= z`, `-x + y <= z`, `x + y - 2 <= -z` |

use lazo_expr::{AuxiliaryVariable, Domain, Expr, Operand, VariableDef};

use super::error::EncodeError;
use super::factory::AuxiliaryFactory;

fn binary_operand(operator: &'static str, operand: Operand) -> Result<Expr, EncodeError> {
    match operand.domain() {
        Domain::Binary => Ok(Expr::var(operand)),
        domain => Err(EncodeError::DomainMismatch {
            operator,
            operand: operand.name().to_string(),
            domain,
        }),
    }
}

impl AuxiliaryFactory {
    /// `z = x AND y`.
    pub fn and(
        &self,
        x: impl Into<Operand>,
        y: impl Into<Operand>,
    ) -> Result<AuxiliaryVariable, EncodeError> {
        let x = binary_operand("And", x.into())?;
        let y = binary_operand("And", y.into())?;
        Ok(self.create_auxiliary("and", VariableDef::binary(), |z| {
            let z = Expr::var(z);
            vec![
                (x.clone() + &y - 1.0).le(&z),
                x.ge(&z),
                y.ge(&z),
            ]
        }))
    }

    /// `z = x OR y`.
    pub fn or(
        &self,
        x: impl Into<Operand>,
        y: impl Into<Operand>,
    ) -> Result<AuxiliaryVariable, EncodeError> {
        let x = binary_operand("Or", x.into())?;
        let y = binary_operand("Or", y.into())?;
        Ok(self.create_auxiliary("or", VariableDef::binary(), |z| {
            let z = Expr::var(z);
            vec![(x.clone() + &y).ge(&z), x.le(&z), y.le(&z)]
        }))
    }

    /// `z = x XOR y`.
    pub fn xor(
        &self,
        x: impl Into<Operand>,
        y: impl Into<Operand>,
    ) -> Result<AuxiliaryVariable, EncodeError> {
        let x = binary_operand("Xor", x.into())?;
        let y = binary_operand("Xor", y.into())?;
        Ok(self.create_auxiliary("xor", VariableDef::binary(), |z| {
            let z = Expr::var(z);
            vec![
                (x.clone() + &y).ge(&z),
                (x.clone() - &y).le(&z),
                (-x.clone() + &y).le(&z),
                (x + &y - 2.0).le(-z),
            ]
        }))
    }
}
