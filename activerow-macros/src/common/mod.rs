pub mod type_utils;
