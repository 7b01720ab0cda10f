//! `define_port_error!` generates a port error enum with one `thiserror`
//! message per variant and a snake_case constructor for each variant.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum TravelRepositoryError {
//!         Connection { message: String } => "travel store unavailable: {message}",
//!     }
//! }
//! let err = TravelRepositoryError::connection("pool timed out");
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SeatLedgerError {
            Unavailable { message: String } => "seat ledger unavailable: {message}",
            Full { max_person: u32 } => "travel is full at {max_person}",
            Stale { message: String, version: i64 } => "stale read of {message} at {version}",
            Closed => "travel is closed",
        }
    }

    #[rstest]
    fn string_fields_take_str_slices() {
        let err = SeatLedgerError::unavailable("pool timed out");
        assert_eq!(err.to_string(), "seat ledger unavailable: pool timed out");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            SeatLedgerError::full(4_u32),
            SeatLedgerError::Full { max_person: 4 }
        );
    }

    #[rstest]
    fn constructors_take_fields_in_declaration_order() {
        let err = SeatLedgerError::stale("travel 3", 7_i64);
        assert_eq!(err.to_string(), "stale read of travel 3 at 7");
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SeatLedgerError::closed(), SeatLedgerError::Closed);
    }
}
