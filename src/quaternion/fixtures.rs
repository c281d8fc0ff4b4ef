use crate::simd::SimdFloat;

pub(crate) fn cast<T: SimdFloat>(value: f64) -> T {
    num_traits::cast(value).unwrap()
}

pub(crate) fn samples<T: SimdFloat>() -> [[T; 4]; 4] {
    [
        [0.5, -1.25, 2.0, 3.0],
        [-0.75, 0.125, 1.5, -2.0],
        [3.0, 2.0, -1.0, 0.25],
        [0.1, 0.2, 0.3, 0.4],
    ]
    .map(|sample| sample.map(cast))
}

/// Runs a generic `fn name<T, W>()` as one test over every supported layout.
macro_rules! for_all_layouts {
    ($($name:ident),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                super::$name::<f32, $crate::Bits64>();
                super::$name::<f32, $crate::Bits128>();
                super::$name::<f32, $crate::Bits256>();
                super::$name::<f32, $crate::Bits512>();
                super::$name::<f64, $crate::Bits128>();
                super::$name::<f64, $crate::Bits256>();
                super::$name::<f64, $crate::Bits512>();
            }
        )*
    };
}

pub(crate) use for_all_layouts;
