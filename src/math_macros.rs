// A couple of macros to help with implementing Add, Sub, Mul and Neg for all
// combinations of owned/borrowed duals.

macro_rules! impl_bin_op {
    // Add          , add         , AddOp
    ($op_trait:ident, $op_fn:ident, $op:ty) => {
        impl<T: Num, D: Tangent<T> + 'static> $op_trait for Dual<T, D> {
            type Output = Self;

            fn $op_fn(self, rhs: Self) -> Self::Output {
                self.binary::<$op>(&rhs)
            }
        }

        impl<T: Num, D: Tangent<T> + 'static> $op_trait for &Dual<T, D> {
            type Output = Dual<T, D>;

            fn $op_fn(self, rhs: Self) -> Self::Output {
                self.binary::<$op>(rhs)
            }
        }

        impl<T: Num, D: Tangent<T> + 'static> $op_trait<&Dual<T, D>> for Dual<T, D> {
            type Output = Self;

            fn $op_fn(self, rhs: &Dual<T, D>) -> Self::Output {
                self.binary::<$op>(rhs)
            }
        }

        impl<T: Num, D: Tangent<T> + 'static> $op_trait<Dual<T, D>> for &Dual<T, D> {
            type Output = Dual<T, D>;

            fn $op_fn(self, rhs: Dual<T, D>) -> Self::Output {
                self.binary::<$op>(&rhs)
            }
        }
    };
}

pub(crate) use impl_bin_op;

macro_rules! impl_un_op {
    ($op_trait:ident, $op_fn:ident, $op:ty) => {
        impl<T: Num, D: Tangent<T> + 'static> $op_trait for Dual<T, D> {
            type Output = Self;

            fn $op_fn(self) -> Self::Output {
                self.unary::<$op>(&())
            }
        }

        impl<T: Num, D: Tangent<T> + 'static> $op_trait for &Dual<T, D> {
            type Output = Dual<T, D>;

            fn $op_fn(self) -> Self::Output {
                self.unary::<$op>(&())
            }
        }
    };
}

pub(crate) use impl_un_op;
