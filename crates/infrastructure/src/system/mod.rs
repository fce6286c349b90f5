pub mod resolver_list;

pub use resolver_list::FileResolverList;
