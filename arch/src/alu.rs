use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Alu {
    ADD,
    SUB,
    MUL,
    DIV,
}

/// Integer arithmetic wraps on overflow. `None` on division by zero.
pub fn ialu(op: Alu, a: i64, b: i64) -> Option<i64> {
    use Alu::*;
    match op {
        ADD => Some(a.wrapping_add(b)),
        SUB => Some(a.wrapping_sub(b)),
        MUL => Some(a.wrapping_mul(b)),
        DIV => match b {
            0 => None,
            _ => Some(a.wrapping_div(b)),
        },
    }
}

/// IEEE-754 arithmetic, division by zero yields an infinity or NaN.
pub fn dalu(op: Alu, a: f64, b: f64) -> f64 {
    use Alu::*;
    match op {
        ADD => a + b,
        SUB => a - b,
        MUL => a * b,
        DIV => a / b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ops() {
        assert_eq!(ialu(Alu::ADD, 3, 4), Some(7));
        assert_eq!(ialu(Alu::SUB, 3, 4), Some(-1));
        assert_eq!(ialu(Alu::MUL, -3, 4), Some(-12));
        assert_eq!(ialu(Alu::DIV, 7, 2), Some(3));
        assert_eq!(ialu(Alu::DIV, -7, 2), Some(-3));
    }

    #[test]
    fn integer_edge_cases() {
        assert_eq!(ialu(Alu::DIV, 1, 0), None);
        assert_eq!(ialu(Alu::ADD, i64::MAX, 1), Some(i64::MIN));
        assert_eq!(ialu(Alu::DIV, i64::MIN, -1), Some(i64::MIN));
    }

    #[test]
    fn double_ops() {
        assert_eq!(dalu(Alu::ADD, 1.5, 1.0), 2.5);
        assert_eq!(dalu(Alu::SUB, 1.5, 1.0), 0.5);
        assert_eq!(dalu(Alu::MUL, 1.5, 2.0), 3.0);
        assert_eq!(dalu(Alu::DIV, 1.0, 4.0), 0.25);
        assert!(dalu(Alu::DIV, 1.0, 0.0).is_infinite());
    }
}
