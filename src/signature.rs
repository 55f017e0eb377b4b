//! Machine-readable description of every exported symbol.
//!
//! A binding harness needs more than C prototypes to marshal these fixtures:
//! it has to know which pointer parameters are outputs, which are in/out,
//! and which are arrays together with the parameter holding their length.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CType {
    Void,
    Int,
    Float,
    Double,
    UnsignedLongLong,
    IntPtr,
    FloatPtr,
    DoublePtr,
    PointPtr,
}

impl CType {
    pub fn c_name(&self) -> &'static str {
        match self {
            CType::Void => "void",
            CType::Int => "int",
            CType::Float => "float",
            CType::Double => "double",
            CType::UnsignedLongLong => "unsigned long long",
            CType::IntPtr => "int*",
            CType::FloatPtr => "float*",
            CType::DoublePtr => "double*",
            CType::PointPtr => "point_t*",
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            CType::IntPtr | CType::FloatPtr | CType::DoublePtr | CType::PointPtr
        )
    }
}

/// How a harness marshals a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ParamRole {
    In,
    /// Written by the callee, never read.
    Out,
    /// Read then written by the callee.
    InOut,
    /// Element buffer whose length is passed in parameter `len`.
    Array { len: usize },
}

/// The calling-convention pattern a function exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    IntegerArith,
    NullReturn,
    FloatArith,
    OutputParam,
    Mixed,
    ArrayMutation,
    StructLifecycle,
}

impl Pattern {
    pub fn title(&self) -> &'static str {
        match self {
            Pattern::IntegerArith => "Integer in/out",
            Pattern::NullReturn => "Null-pointer return",
            Pattern::FloatArith => "Float in/out",
            Pattern::OutputParam => "Write-through output parameters",
            Pattern::Mixed => "Mixed in/out/by-value",
            Pattern::ArrayMutation => "Fixed-size array mutation",
            Pattern::StructLifecycle => "Struct lifecycle and accessors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: CType,
    #[serde(flatten)]
    pub role: ParamRole,
}

impl Param {
    fn new(name: &str, ty: CType, role: ParamRole) -> Self {
        Param {
            name: name.to_string(),
            ty,
            role,
        }
    }

    fn input(name: &str, ty: CType) -> Self {
        Self::new(name, ty, ParamRole::In)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub pattern: Pattern,
    pub ret: CType,
    pub params: Vec<Param>,
}

impl Signature {
    fn new(name: &str, pattern: Pattern, ret: CType, params: Vec<Param>) -> Self {
        Signature {
            name: name.to_string(),
            pattern,
            ret,
            params,
        }
    }

    fn indices_where(&self, pred: impl Fn(&ParamRole) -> bool) -> Vec<usize> {
        self.params
            .iter()
            .enumerate()
            .filter(|(_, p)| pred(&p.role))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of write-only parameters.
    pub fn outargs(&self) -> Vec<usize> {
        self.indices_where(|r| matches!(r, ParamRole::Out))
    }

    pub fn inoutargs(&self) -> Vec<usize> {
        self.indices_where(|r| matches!(r, ParamRole::InOut))
    }

    pub fn arrays(&self) -> Vec<usize> {
        self.indices_where(|r| matches!(r, ParamRole::Array { .. }))
    }

    /// C prototype without the trailing semicolon.
    pub fn prototype(&self) -> String {
        let params = if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params
                .iter()
                .map(|p| format_decl(p.ty, &p.name))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{}({})", format_decl(self.ret, &self.name), params)
    }
}

// "int*" + "a" -> "int *a"
fn format_decl(ty: CType, name: &str) -> String {
    match ty.c_name().strip_suffix('*') {
        Some(base) => format!("{} *{}", base, name),
        None => format!("{} {}", ty.c_name(), name),
    }
}

/// Every exported function, in header order.
pub fn catalog() -> Vec<Signature> {
    use CType::*;
    use Pattern::*;

    let int_unary = |name: &str| Signature::new(name, IntegerArith, Int, vec![Param::input("i", Int)]);
    let int_binary = |name: &str| {
        Signature::new(
            name,
            IntegerArith,
            Int,
            vec![Param::input("i", Int), Param::input("j", Int)],
        )
    };

    vec![
        int_unary("myint_succ"),
        int_unary("myint_succ2"),
        int_unary("myint_doubled"),
        int_binary("myint_add"),
        int_binary("myint_add2"),
        int_binary("myint_mult"),
        Signature::new("myintp_null", NullReturn, IntPtr, vec![Param::input("i", Int)]),
        Signature::new("myfloatp_null", NullReturn, FloatPtr, vec![Param::input("i", Float)]),
        Signature::new("myfloat_succ", FloatArith, Float, vec![Param::input("i", Float)]),
        Signature::new(
            "myfloat_add",
            FloatArith,
            Float,
            vec![Param::input("i", Float), Param::input("j", Float)],
        ),
        Signature::new(
            "set_ptr_succ",
            OutputParam,
            Int,
            vec![Param::input("i", Int), Param::new("j", IntPtr, ParamRole::Out)],
        ),
        Signature::new(
            "set_ptr_add",
            OutputParam,
            Int,
            vec![Param::input("i", Int), Param::new("j", IntPtr, ParamRole::InOut)],
        ),
        Signature::new(
            "set_ptrf",
            OutputParam,
            Float,
            vec![Param::input("i", Float), Param::new("j", FloatPtr, ParamRole::Out)],
        ),
        Signature::new(
            "incr_ptrf",
            OutputParam,
            Float,
            vec![Param::new("i", FloatPtr, ParamRole::InOut)],
        ),
        Signature::new(
            "complicated",
            Mixed,
            Double,
            vec![
                Param::input("in", Int),
                Param::new("out", FloatPtr, ParamRole::Out),
                Param::new("inout", IntPtr, ParamRole::InOut),
                Param::input("in2", UnsignedLongLong),
                Param::new("inout2", DoublePtr, ParamRole::InOut),
            ],
        ),
        Signature::new(
            "myint_add_array",
            ArrayMutation,
            Int,
            vec![
                Param::input("j", Int),
                Param::new("a", IntPtr, ParamRole::Array { len: 2 }),
                Param::input("n", Int),
            ],
        ),
        Signature::new(
            "make_point",
            StructLifecycle,
            PointPtr,
            vec![Param::input("x", Int), Param::input("y", Int)],
        ),
        Signature::new("del_point", StructLifecycle, Void, vec![Param::input("p", PointPtr)]),
        Signature::new("point_x", StructLifecycle, Int, vec![Param::input("p", PointPtr)]),
        Signature::new("point_y", StructLifecycle, Int, vec![Param::input("p", PointPtr)]),
        Signature::new(
            "point_setx",
            StructLifecycle,
            PointPtr,
            vec![Param::input("p", PointPtr), Param::input("x", Int)],
        ),
        Signature::new(
            "point_sety",
            StructLifecycle,
            PointPtr,
            vec![Param::input("p", PointPtr), Param::input("y", Int)],
        ),
        Signature::new(
            "point_dist",
            StructLifecycle,
            Double,
            vec![Param::input("p1", PointPtr), Param::input("p2", PointPtr)],
        ),
    ]
}

pub fn find(name: &str) -> Option<Signature> {
    catalog().into_iter().find(|sig| sig.name == name)
}
