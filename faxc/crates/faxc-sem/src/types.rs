//! The type system: a tagged representation of every type a bound program
//! can carry, plus the operations the binder consults to check and convert
//! between them (§4.2 of the binder's governing rules).
//!
//! Types are plain values — no arena, no interning — mirroring how small
//! the lattice actually is. `Structure`/`Enumeration` only carry a `Symbol`
//! name plus their field/variant shape; two structurally identical
//! declarations under different names are still distinct types (nominal).

use faxc_util::Symbol;

/// The scalar kinds a `Primitive` type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
    /// The type of a type-expression (`type(i32)`), used by §3.3's
    /// type-expression variant.
    Type,
}

impl PrimitiveKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::U8
                | PrimitiveKind::U16
                | PrimitiveKind::U32
                | PrimitiveKind::U64
                | PrimitiveKind::I8
                | PrimitiveKind::I16
                | PrimitiveKind::I32
                | PrimitiveKind::I64
        )
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveKind::I8 | PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            PrimitiveKind::U8 | PrimitiveKind::U16 | PrimitiveKind::U32 | PrimitiveKind::U64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::F32 | PrimitiveKind::F64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Bit width, used to rank widenings within a sign class.
    pub fn rank(self) -> u8 {
        match self {
            PrimitiveKind::U8 | PrimitiveKind::I8 => 8,
            PrimitiveKind::U16 | PrimitiveKind::I16 => 16,
            PrimitiveKind::U32 | PrimitiveKind::I32 | PrimitiveKind::F32 => 32,
            PrimitiveKind::U64 | PrimitiveKind::I64 | PrimitiveKind::F64 => 64,
            PrimitiveKind::Void
            | PrimitiveKind::Bool
            | PrimitiveKind::Char
            | PrimitiveKind::String
            | PrimitiveKind::Type => 0,
        }
    }

    /// Whether a literal integer value fits in this kind's range.
    pub fn contains_int_literal(self, value: i128) -> bool {
        let (lo, hi): (i128, i128) = match self {
            PrimitiveKind::U8 => (0, u8::MAX as i128),
            PrimitiveKind::U16 => (0, u16::MAX as i128),
            PrimitiveKind::U32 => (0, u32::MAX as i128),
            PrimitiveKind::U64 => (0, u64::MAX as i128),
            PrimitiveKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            PrimitiveKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            PrimitiveKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            PrimitiveKind::I64 => (i64::MIN as i128, i64::MAX as i128),
            _ => return false,
        };
        value >= lo && value <= hi
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "string",
            PrimitiveKind::Type => "type",
        };
        f.write_str(s)
    }
}

/// A type in the Fax source language's type system (§3.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive {
        kind: PrimitiveKind,
        mutable: bool,
    },
    Array {
        element: Box<Type>,
        length: Option<u64>,
        mutable: bool,
    },
    Function {
        return_ty: Box<Type>,
        parameters: Vec<Type>,
    },
    Structure {
        name: Symbol,
        fields: Vec<(Symbol, Type)>,
    },
    Enumeration {
        name: Symbol,
        variants: Vec<(Symbol, Option<Type>)>,
    },
    /// A transparent alias: `target` is the type it stands for. Every
    /// operation in this module unwraps `Alias` before applying its rule,
    /// so an alias chain behaves exactly like its underlying type.
    Alias {
        name: Symbol,
        target: Box<Type>,
    },
    /// The poisoned type. `Invalid` is produced whenever the binder gives
    /// up on a subtree after reporting a diagnostic; every operation here
    /// absorbs it as an identity match so the poison doesn't cascade into
    /// a second, unrelated report at the same root cause.
    Invalid,
}

/// How a value of one type may flow into a location of another (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignability {
    Identity,
    ImplicitWiden,
    ImplicitNarrowWarn,
    ExplicitOnly,
    Incompatible,
}

impl Assignability {
    pub fn is_allowed_implicitly(self) -> bool {
        matches!(self, Assignability::Identity | Assignability::ImplicitWiden)
    }

    pub fn is_allowed_explicitly(self) -> bool {
        !matches!(self, Assignability::Incompatible)
    }
}

fn void() -> Type {
    Type::Primitive {
        kind: PrimitiveKind::Void,
        mutable: false,
    }
}

fn prim(kind: PrimitiveKind) -> Type {
    Type::Primitive {
        kind,
        mutable: false,
    }
}

impl Type {
    pub fn void() -> Type {
        void()
    }

    pub fn bool_ty() -> Type {
        prim(PrimitiveKind::Bool)
    }

    pub fn char_ty() -> Type {
        prim(PrimitiveKind::Char)
    }

    pub fn string_ty() -> Type {
        prim(PrimitiveKind::String)
    }

    pub fn i32_ty() -> Type {
        prim(PrimitiveKind::I32)
    }

    pub fn invalid() -> Type {
        Type::Invalid
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.unwrap_alias(), Type::Invalid)
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self.unwrap_alias(),
            Type::Primitive {
                kind: PrimitiveKind::Void,
                ..
            }
        )
    }

    /// Peels through `Alias` layers to the underlying type.
    pub fn unwrap_alias(&self) -> &Type {
        let mut current = self;
        while let Type::Alias { target, .. } = current {
            current = target;
        }
        current
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.unwrap_alias() {
            Type::Primitive { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.primitive_kind().map(|k| k.is_numeric()).unwrap_or(false)
    }

    pub fn is_integer(&self) -> bool {
        self.primitive_kind().map(|k| k.is_integer()).unwrap_or(false)
    }

    /// Structural equality on kind and fields, ignoring `mutable` (§3.1).
    pub fn equals(&self, other: &Type) -> bool {
        match (self.unwrap_alias(), other.unwrap_alias()) {
            (Type::Invalid, Type::Invalid) => true,
            (
                Type::Primitive { kind: k1, .. },
                Type::Primitive { kind: k2, .. },
            ) => k1 == k2,
            (
                Type::Array {
                    element: e1,
                    length: l1,
                    ..
                },
                Type::Array {
                    element: e2,
                    length: l2,
                    ..
                },
            ) => l1 == l2 && e1.equals(e2),
            (
                Type::Function {
                    return_ty: r1,
                    parameters: p1,
                },
                Type::Function {
                    return_ty: r2,
                    parameters: p2,
                },
            ) => {
                r1.equals(r2)
                    && p1.len() == p2.len()
                    && p1.iter().zip(p2.iter()).all(|(a, b)| a.equals(b))
            }
            (Type::Structure { name: n1, .. }, Type::Structure { name: n2, .. }) => n1 == n2,
            (Type::Enumeration { name: n1, .. }, Type::Enumeration { name: n2, .. }) => n1 == n2,
            _ => false,
        }
    }

    /// The fundamental conversion-compatibility relation (§4.2).
    pub fn assignable(&self, dst: &Type) -> Assignability {
        let src = self.unwrap_alias();
        let dst_u = dst.unwrap_alias();

        if matches!(src, Type::Invalid) || matches!(dst_u, Type::Invalid) {
            return Assignability::Identity;
        }

        if src.equals(dst_u) {
            return Assignability::Identity;
        }

        match (src, dst_u) {
            (Type::Primitive { kind: sk, .. }, Type::Primitive { kind: dk, .. }) => {
                numeric_assignable(*sk, *dk)
            }
            (
                Type::Array {
                    element: se,
                    length: sl,
                    ..
                },
                Type::Array {
                    element: de,
                    length: dl,
                    ..
                },
            ) => {
                let elem = se.assignable(de);
                let length_ok = match (sl, dl) {
                    (_, None) => true,
                    (Some(a), Some(b)) => a == b,
                    (None, Some(_)) => false,
                };
                if !length_ok {
                    return Assignability::Incompatible;
                }
                elem
            }
            _ => Assignability::Incompatible,
        }
    }

    /// Least upper bound of `self` and `other` under `assignable`, if any.
    pub fn common(&self, other: &Type) -> Option<Type> {
        if self.is_invalid() || other.is_invalid() {
            return Some(Type::Invalid);
        }
        if self.equals(other) {
            return Some(self.clone());
        }
        if self.assignable(other).is_allowed_implicitly() {
            return Some(other.clone());
        }
        if other.assignable(self).is_allowed_implicitly() {
            return Some(self.clone());
        }
        None
    }

    /// Result type of a unary operator applied to `self`, or `None` if no
    /// rule exists (§4.2, §4.5).
    pub fn unary(op: UnaryOp, operand: &Type) -> Option<Type> {
        if operand.is_invalid() {
            return Some(Type::Invalid);
        }
        let kind = operand.primitive_kind()?;
        match op {
            UnaryOp::Not => {
                if kind == PrimitiveKind::Bool {
                    Some(prim(PrimitiveKind::Bool))
                } else {
                    None
                }
            }
            UnaryOp::Neg => {
                if kind.is_signed() || kind.is_float() {
                    Some(prim(kind))
                } else {
                    None
                }
            }
            UnaryOp::BitNot => {
                if kind.is_integer() {
                    Some(prim(kind))
                } else {
                    None
                }
            }
        }
    }

    /// Result type of a binary operator applied to `(l, r)`, or `None`
    /// (§4.2, §4.5).
    pub fn binary(op: BinaryOp, l: &Type, r: &Type) -> Option<Type> {
        if l.is_invalid() || r.is_invalid() {
            return Some(Type::Invalid);
        }

        match op {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Mod => {
                if op == BinaryOp::Add {
                    if let (Some(PrimitiveKind::String), Some(rk)) =
                        (l.primitive_kind(), r.primitive_kind())
                    {
                        if rk == PrimitiveKind::String || rk == PrimitiveKind::Char {
                            return Some(prim(PrimitiveKind::String));
                        }
                    }
                }
                if l.is_numeric() && r.is_numeric() {
                    l.common(r)
                } else {
                    None
                }
            }
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::Le
            | BinaryOp::Ge => {
                if l.common(r).is_some() {
                    Some(prim(PrimitiveKind::Bool))
                } else {
                    None
                }
            }
            BinaryOp::And | BinaryOp::Or => {
                if l.primitive_kind() == Some(PrimitiveKind::Bool)
                    && r.primitive_kind() == Some(PrimitiveKind::Bool)
                {
                    Some(prim(PrimitiveKind::Bool))
                } else {
                    None
                }
            }
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::Shl | BinaryOp::Shr => {
                match (l.primitive_kind(), r.primitive_kind()) {
                    (Some(lk), Some(rk)) if lk.is_integer() && rk.is_integer() && lk == rk => {
                        Some(prim(lk))
                    }
                    _ => None,
                }
            }
        }
    }
}

/// Widening/narrowing rule between two numeric (or non-numeric) primitive
/// kinds, including the explicit-only special cases named in §4.2.
fn numeric_assignable(src: PrimitiveKind, dst: PrimitiveKind) -> Assignability {
    if src == dst {
        return Assignability::Identity;
    }

    // bool<->numeric, char<->u8, string<->array-of-char are explicit only;
    // char/string are handled by their own arms below, so here we only need
    // the bool special case before the general numeric branch.
    if src == PrimitiveKind::Bool || dst == PrimitiveKind::Bool {
        return Assignability::ExplicitOnly;
    }
    if (src == PrimitiveKind::Char && dst == PrimitiveKind::U8)
        || (src == PrimitiveKind::U8 && dst == PrimitiveKind::Char)
    {
        return Assignability::ExplicitOnly;
    }
    if src == PrimitiveKind::Char || dst == PrimitiveKind::Char {
        return Assignability::ExplicitOnly;
    }
    if src == PrimitiveKind::String || dst == PrimitiveKind::String {
        return Assignability::ExplicitOnly;
    }

    if !src.is_numeric() || !dst.is_numeric() {
        return Assignability::Incompatible;
    }

    let same_sign_class = (src.is_signed() && dst.is_signed())
        || (src.is_unsigned() && dst.is_unsigned())
        || (src.is_float() && dst.is_float());

    if same_sign_class {
        if dst.rank() >= src.rank() {
            Assignability::ImplicitWiden
        } else {
            Assignability::ExplicitOnly
        }
    } else if src.is_float() != dst.is_float() {
        // float<->int requires an explicit conversion either direction.
        Assignability::ExplicitOnly
    } else {
        // signed<->unsigned mismatch requires an explicit conversion.
        Assignability::ExplicitOnly
    }
}

/// Picks the widening float target for an integer kind per the tie-break
/// rule in §4.2: the smaller float that fully contains the integer's
/// range, else the larger float.
pub fn int_to_float_widen_target(int_kind: PrimitiveKind) -> PrimitiveKind {
    match int_kind {
        PrimitiveKind::I32 | PrimitiveKind::U32 => PrimitiveKind::F64,
        PrimitiveKind::I16 | PrimitiveKind::U16 | PrimitiveKind::I8 | PrimitiveKind::U8 => {
            PrimitiveKind::F32
        }
        _ => PrimitiveKind::F64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}
