use sea_orm::{ColumnTrait, Condition, DbErr, prelude::Expr};
use util::filters::{CompareOp, FilterParam, FilterValue};

pub struct FilterUtils;

impl FilterUtils {
    /// Apply a single filter parameter to a condition using any SeaORM column
    pub fn apply_filter<C>(
        condition: Condition,
        column: C,
        filter_param: &FilterParam,
    ) -> Result<Condition, DbErr>
    where
        C: ColumnTrait,
    {
        match (&filter_param.value, &filter_param.operator) {
            // String operations
            (FilterValue::String(value), CompareOp::Eq) => {
                Ok(condition.add(column.eq(value.clone())))
            }
            (FilterValue::String(value), CompareOp::Ne) => {
                Ok(condition.add(column.ne(value.clone())))
            }
            (FilterValue::String(value), CompareOp::Like) => {
                let pattern = format!("%{}%", value.to_lowercase());
                Ok(condition
                    .add(Expr::cust(format!("LOWER({})", column.as_str())).like(pattern.as_str())))
            }
            (FilterValue::String(value), CompareOp::Gt) => {
                Ok(condition.add(column.gt(value.clone())))
            }
            (FilterValue::String(value), CompareOp::Gte) => {
                Ok(condition.add(column.gte(value.clone())))
            }
            (FilterValue::String(value), CompareOp::Lt) => {
                Ok(condition.add(column.lt(value.clone())))
            }
            (FilterValue::String(value), CompareOp::Lte) => {
                Ok(condition.add(column.lte(value.clone())))
            }

            // Integer operations
            (FilterValue::Int(value), CompareOp::Eq) => Ok(condition.add(column.eq(*value))),
            (FilterValue::Int(value), CompareOp::Ne) => Ok(condition.add(column.ne(*value))),
            (FilterValue::Int(value), CompareOp::Gt) => Ok(condition.add(column.gt(*value))),
            (FilterValue::Int(value), CompareOp::Gte) => Ok(condition.add(column.gte(*value))),
            (FilterValue::Int(value), CompareOp::Lt) => Ok(condition.add(column.lt(*value))),
            (FilterValue::Int(value), CompareOp::Lte) => Ok(condition.add(column.lte(*value))),

            // Float operations
            (FilterValue::Float(value), CompareOp::Eq) => Ok(condition.add(column.eq(*value))),
            (FilterValue::Float(value), CompareOp::Ne) => Ok(condition.add(column.ne(*value))),
            (FilterValue::Float(value), CompareOp::Gt) => Ok(condition.add(column.gt(*value))),
            (FilterValue::Float(value), CompareOp::Gte) => Ok(condition.add(column.gte(*value))),
            (FilterValue::Float(value), CompareOp::Lt) => Ok(condition.add(column.lt(*value))),
            (FilterValue::Float(value), CompareOp::Lte) => Ok(condition.add(column.lte(*value))),

            // Boolean operations
            (FilterValue::Bool(value), CompareOp::Eq) => Ok(condition.add(column.eq(*value))),
            (FilterValue::Bool(value), CompareOp::Ne) => Ok(condition.add(column.ne(*value))),

            // DateTime operations
            (FilterValue::DateTime(value), CompareOp::Eq) => Ok(condition.add(column.eq(*value))),
            (FilterValue::DateTime(value), CompareOp::Ne) => Ok(condition.add(column.ne(*value))),
            (FilterValue::DateTime(value), CompareOp::Gt) => Ok(condition.add(column.gt(*value))),
            (FilterValue::DateTime(value), CompareOp::Gte) => Ok(condition.add(column.gte(*value))),
            (FilterValue::DateTime(value), CompareOp::Lt) => Ok(condition.add(column.lt(*value))),
            (FilterValue::DateTime(value), CompareOp::Lte) => Ok(condition.add(column.lte(*value))),

            // Invalid combinations
            (
                FilterValue::Bool(_),
                CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte | CompareOp::Like,
            ) => Err(DbErr::Custom(format!(
                "Invalid operator {:?} for boolean value",
                filter_param.operator
            ))),
            (FilterValue::Int(_) | FilterValue::Float(_), CompareOp::Like) => Err(DbErr::Custom(
                "LIKE operator not supported for numeric values".to_string(),
            )),
            (FilterValue::DateTime(_), CompareOp::Like) => Err(DbErr::Custom(
                "LIKE operator not supported for DateTime values".to_string(),
            )),
        }
    }

    /// Generic method to apply all filter parameters with proper column resolution
    pub fn apply_all_filters<C>(
        filter_params: &[FilterParam],
        column_resolver: impl Fn(&str) -> Result<C, DbErr>,
    ) -> Result<Condition, DbErr>
    where
        C: ColumnTrait,
    {
        let mut condition = Condition::all();

        for filter_param in filter_params {
            let column = column_resolver(&filter_param.column)?;
            condition = Self::apply_filter(condition, column, filter_param)?;
        }

        Ok(condition)
    }
}
